// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication adapter trait.

use async_trait::async_trait;

use crate::error::SeekwellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Actor;

/// Resolves a presented credential to an [`Actor`] and its capabilities.
///
/// Authentication only establishes identity. Capability checks happen later,
/// immediately before each mutation.
#[async_trait]
pub trait AuthAdapter: PluginAdapter {
    /// Authenticates the given bearer token. Returns `None` for unknown tokens.
    async fn authenticate(&self, token: &str) -> Result<Option<Actor>, SeekwellError>;
}
