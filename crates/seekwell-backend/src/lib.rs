// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search backend clients for Seekwell.
//!
//! Each client implements [`SearchBackend`](seekwell_core::SearchBackend):
//! it validates the settings of servers of its type and pings the engine they
//! describe. The [`BackendCatalog`] holds one client per enabled backend type.

pub mod catalog;
pub mod database;
pub mod elasticsearch;
pub mod http;
pub mod solr;

pub use catalog::BackendCatalog;
pub use database::DatabaseBackend;
pub use elasticsearch::ElasticsearchBackend;
pub use solr::SolrBackend;
