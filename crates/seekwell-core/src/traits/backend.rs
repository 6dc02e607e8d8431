// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search backend client trait.

use async_trait::async_trait;

use crate::error::SeekwellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{BackendType, Settings};

/// Client for one kind of search engine.
///
/// Seekwell never queries or indexes through these clients; it only validates
/// server settings and checks connectivity.
#[async_trait]
pub trait SearchBackend: PluginAdapter {
    /// The backend type this client serves.
    fn backend_type(&self) -> BackendType;

    /// Checks that `settings` are complete and well-formed for this backend.
    fn validate_settings(&self, settings: &Settings) -> Result<(), SeekwellError>;

    /// Returns true if the engine described by `settings` answers.
    async fn ping(&self, settings: &Settings) -> bool;
}
