// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Seekwell integration tests.
//!
//! Provides mock backends and test harness infrastructure for fast,
//! deterministic tests without running search engines.
//!
//! # Components
//!
//! - [`MockBackend`] - Backend client with a switchable reachability flag
//! - [`TestHarness`] - Temp SQLite store, registries, and actors wired together

pub mod harness;
pub mod mock_backend;

pub use harness::{sample_index, TestHarness, ADMIN_TOKEN, VIEWER_TOKEN};
pub use mock_backend::MockBackend;
