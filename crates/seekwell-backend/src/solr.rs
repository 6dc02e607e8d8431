// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Solr client.
//!
//! Settings: `url` (required, base URL of the Solr webapp), `core`
//! (optional core or collection name), `username`/`password` (optional
//! basic auth). A ping hits `{url}[/{core}]/admin/ping`.

use async_trait::async_trait;
use seekwell_core::{
    AdapterType, BackendType, HealthStatus, PluginAdapter, SearchBackend, SeekwellError, Settings,
};

use crate::http::{join_path, string_setting, HttpPinger};

pub struct SolrBackend {
    http: HttpPinger,
}

impl SolrBackend {
    pub fn new(http: HttpPinger) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PluginAdapter for SolrBackend {
    fn name(&self) -> &str {
        "solr"
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
impl SearchBackend for SolrBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Solr
    }

    fn validate_settings(&self, settings: &Settings) -> Result<(), SeekwellError> {
        self.http.endpoint(settings)?;
        string_setting(settings, "core")?;
        string_setting(settings, "username")?;
        string_setting(settings, "password")?;
        Ok(())
    }

    async fn ping(&self, settings: &Settings) -> bool {
        let Ok(base) = self.http.endpoint(settings) else {
            return false;
        };
        let url = match string_setting(settings, "core") {
            Ok(Some(core)) => join_path(&base, &[core, "admin", "ping"]),
            Ok(None) => join_path(&base, &["admin", "ping"]),
            Err(_) => return false,
        };
        let auth = match string_setting(settings, "username") {
            Ok(Some(user)) => Some((user, string_setting(settings, "password").ok().flatten())),
            _ => None,
        };
        self.http.get_ok(url, auth).await
    }
}
