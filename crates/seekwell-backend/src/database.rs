// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local database backend.
//!
//! Content is searched in the host's own database, so there is nothing remote
//! to reach and a ping always succeeds. `min_chars` (optional, positive
//! integer) sets the shortest indexed token.

use async_trait::async_trait;
use seekwell_core::{
    AdapterType, BackendType, HealthStatus, PluginAdapter, SearchBackend, SeekwellError, Settings,
};

#[derive(Debug, Default)]
pub struct DatabaseBackend;

impl DatabaseBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PluginAdapter for DatabaseBackend {
    fn name(&self) -> &str {
        "database"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Backend
    }

    async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeekwellError> {
        Ok(())
    }
}

#[async_trait]
impl SearchBackend for DatabaseBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Database
    }

    fn validate_settings(&self, settings: &Settings) -> Result<(), SeekwellError> {
        match settings.get("min_chars") {
            None => Ok(()),
            Some(value) if value.as_u64().is_some_and(|n| n > 0) => Ok(()),
            Some(_) => Err(SeekwellError::Validation(
                "backend setting `min_chars` must be a positive integer".to_string(),
            )),
        }
    }

    async fn ping(&self, _settings: &Settings) -> bool {
        true
    }
}
