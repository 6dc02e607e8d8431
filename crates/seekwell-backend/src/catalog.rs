// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog of registered backend clients.
//!
//! A server can only be created for a backend type that has a client here.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use seekwell_config::model::BackendsConfig;
use seekwell_core::{BackendType, SearchBackend, SeekwellError};
use tracing::debug;

use crate::database::DatabaseBackend;
use crate::elasticsearch::ElasticsearchBackend;
use crate::http::HttpPinger;
use crate::solr::SolrBackend;

/// Backend clients keyed by the type they serve.
#[derive(Clone, Default)]
pub struct BackendCatalog {
    clients: HashMap<BackendType, Arc<dyn SearchBackend>>,
}

impl BackendCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog for the backend types enabled in configuration.
    pub fn from_config(config: &BackendsConfig) -> Result<Self, SeekwellError> {
        let http = HttpPinger::new(
            Duration::from_secs(config.ping_timeout_secs),
            config.require_tls,
        )?;
        let mut catalog = Self::new();
        for name in &config.enabled {
            let client: Arc<dyn SearchBackend> = match BackendType::parse(name)? {
                BackendType::Solr => Arc::new(SolrBackend::new(http.clone())),
                BackendType::Elasticsearch => Arc::new(ElasticsearchBackend::new(http.clone())),
                BackendType::Database => Arc::new(DatabaseBackend::new()),
            };
            catalog.register(client);
        }
        debug!(backends = ?catalog.types(), "backend catalog built");
        Ok(catalog)
    }

    /// Register a client, replacing any previous client for the same type.
    pub fn register(&mut self, client: Arc<dyn SearchBackend>) {
        self.clients.insert(client.backend_type(), client);
    }

    /// Look up the client for a backend type.
    pub fn get(&self, backend_type: BackendType) -> Option<Arc<dyn SearchBackend>> {
        self.clients.get(&backend_type).cloned()
    }

    /// Like [`get`](Self::get), but a missing client is an `InvalidBackend` error.
    pub fn require(&self, backend_type: BackendType) -> Result<Arc<dyn SearchBackend>, SeekwellError> {
        self.get(backend_type)
            .ok_or_else(|| SeekwellError::InvalidBackend {
                backend: backend_type.to_string(),
            })
    }

    /// Registered backend types, sorted.
    pub fn types(&self) -> Vec<BackendType> {
        let mut types: Vec<_> = self.clients.keys().copied().collect();
        types.sort();
        types
    }
}

impl std::fmt::Debug for BackendCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCatalog")
            .field("types", &self.types())
            .finish()
    }
}
