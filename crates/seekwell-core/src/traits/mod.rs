// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod auth;
pub mod backend;
pub mod storage;

pub use adapter::PluginAdapter;
pub use auth::AuthAdapter;
pub use backend::SearchBackend;
pub use storage::{ConfigStore, EntityCursor};
