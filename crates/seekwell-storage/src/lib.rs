// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for Seekwell.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! search servers and indexes. Referential checks (an index needs its server,
//! a referenced server cannot be deleted) run inside the same transaction as
//! the write they guard.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteConfigStore;
pub use database::Database;
