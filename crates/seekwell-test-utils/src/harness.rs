// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete registry stack with mock backends and a
//! temp SQLite database, plus an admin actor and a read-only viewer actor.

use std::collections::HashMap;
use std::sync::Arc;

use seekwell_backend::BackendCatalog;
use seekwell_config::model::{AccessTokenConfig, SeekwellConfig, StorageConfig};
use seekwell_core::{
    Actor, BackendType, ConfigStore, EntityStatus, FieldDefinition, FieldType, IndexConfig,
    ProcessorRef, SeekwellError, ServerConfig, Settings, ADMINISTER_SEARCH_CONFIGURATION,
};
use seekwell_registry::{AdminSurface, EntityLocks, IndexRegistry, NewServer, ServerRegistry};
use seekwell_storage::SqliteConfigStore;

use crate::mock_backend::MockBackend;

/// Bearer token of the admin actor in [`TestHarness::config`].
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Bearer token of the viewer actor in [`TestHarness::config`].
pub const VIEWER_TOKEN: &str = "test-viewer-token";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    backends: Vec<BackendType>,
    unreachable: Vec<BackendType>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            backends: BackendType::ALL.to_vec(),
            unreachable: Vec::new(),
        }
    }

    /// Register mock clients only for these backend types.
    pub fn with_backends(mut self, backends: &[BackendType]) -> Self {
        self.backends = backends.to_vec();
        self
    }

    /// Make the mock for `backend_type` fail its pings.
    pub fn with_unreachable(mut self, backend_type: BackendType) -> Self {
        self.unreachable.push(backend_type);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, SeekwellError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| SeekwellError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage_config = StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: true,
        };
        let store: Arc<dyn ConfigStore> =
            Arc::new(SqliteConfigStore::open(storage_config.clone()).await?);

        let mut catalog = BackendCatalog::new();
        let mut mocks = HashMap::new();
        for backend_type in self.backends {
            let mock = Arc::new(if self.unreachable.contains(&backend_type) {
                MockBackend::unreachable(backend_type)
            } else {
                MockBackend::new(backend_type)
            });
            catalog.register(mock.clone());
            mocks.insert(backend_type, mock);
        }

        let locks = EntityLocks::new();
        let servers = Arc::new(ServerRegistry::new(store.clone(), catalog, locks.clone()));
        let indexes = Arc::new(IndexRegistry::new(store.clone(), servers.clone(), locks));
        let admin = AdminSurface::new(servers.clone(), indexes.clone());

        let mut config = SeekwellConfig {
            storage: storage_config,
            ..SeekwellConfig::default()
        };
        config.access.tokens = vec![
            AccessTokenConfig {
                name: "admin".to_string(),
                token: ADMIN_TOKEN.to_string(),
                capabilities: vec![ADMINISTER_SEARCH_CONFIGURATION.to_string()],
            },
            AccessTokenConfig {
                name: "viewer".to_string(),
                token: VIEWER_TOKEN.to_string(),
                capabilities: vec!["access administration pages".to_string()],
            },
        ];

        Ok(TestHarness {
            store,
            servers,
            indexes,
            admin,
            mocks,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with mock backends and temp storage.
pub struct TestHarness {
    /// SQLite config store (temp DB, cleaned up on drop).
    pub store: Arc<dyn ConfigStore>,
    pub servers: Arc<ServerRegistry>,
    pub indexes: Arc<IndexRegistry>,
    /// Admin surface over both registries.
    pub admin: AdminSurface,
    /// Mock backend clients keyed by type.
    pub mocks: HashMap<BackendType, Arc<MockBackend>>,
    /// Configuration pointing at the temp store, with admin and viewer tokens.
    pub config: SeekwellConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// An actor holding the search configuration admin capability.
    pub fn admin_actor(&self) -> Actor {
        Actor::new("admin", [ADMINISTER_SEARCH_CONFIGURATION])
    }

    /// An actor that may view admin pages but not change configuration.
    pub fn viewer_actor(&self) -> Actor {
        Actor::new("viewer", ["access administration pages"])
    }

    /// The mock client for `backend_type`, if one was registered.
    pub fn mock(&self, backend_type: BackendType) -> Option<Arc<MockBackend>> {
        self.mocks.get(&backend_type).cloned()
    }

    /// Create an enabled server as the admin actor.
    pub async fn create_server(
        &self,
        id: &str,
        label: &str,
        backend_type: BackendType,
    ) -> Result<ServerConfig, SeekwellError> {
        let mut settings = Settings::new();
        settings.insert("url".into(), serde_json::json!("http://localhost:8983/solr"));
        self.servers
            .create_server(
                &self.admin_actor(),
                NewServer {
                    id: id.to_string(),
                    label: label.to_string(),
                    description: None,
                    backend_type: backend_type.to_string(),
                    backend_settings: settings,
                    status: EntityStatus::Enabled,
                },
            )
            .await
    }

    /// Create an enabled index with a title field and one processor, as the admin actor.
    pub async fn create_index(
        &self,
        id: &str,
        server_id: &str,
    ) -> Result<IndexConfig, SeekwellError> {
        self.indexes
            .create_index(&self.admin_actor(), sample_index(id, server_id))
            .await
    }
}

/// An index definition with a title field and an HTML filter processor.
pub fn sample_index(id: &str, server_id: &str) -> IndexConfig {
    IndexConfig {
        id: id.to_string(),
        label: format!("Index {id}"),
        description: None,
        server_id: server_id.to_string(),
        fields: vec![FieldDefinition::new("title", FieldType::Text)],
        processors: vec![ProcessorRef::new("html_filter")],
        status: EntityStatus::Enabled,
    }
}
