// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-facing admin surface: the configuration overview and access to
//! the registries it is built from.
//!
//! The overview is assembled from two separate listings, indexes first and
//! then servers. It is a point-in-time view and never fails because an
//! entity disappeared between the two reads; such rows are left out.
//! Backend settings are redacted before they leave this module.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use seekwell_core::{
    Actor, BackendType, EntityStatus, SeekwellError, ServerConfig, Settings,
    ADMINISTER_SEARCH_CONFIGURATION,
};
use seekwell_security::{authorize, redact_settings};

use crate::indexes::IndexRegistry;
use crate::servers::ServerRegistry;

/// Root path of the search configuration admin pages.
pub const ADMIN_BASE_PATH: &str = "/admin/config/search/search-api";

/// Path of the "Add server" local action.
pub const ADD_SERVER_PATH: &str = "/admin/config/search/search-api/add-server";

/// Path of the "Add index" local action.
pub const ADD_INDEX_PATH: &str = "/admin/config/search/search-api/add-index";

/// A link to an operator action offered on the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalAction {
    /// Link text, e.g. "Add server".
    pub title: String,
    /// Admin path the action posts to.
    pub path: String,
}

impl LocalAction {
    fn new(title: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            path: path.to_string(),
        }
    }
}

/// A server row in the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSummary {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub backend_type: BackendType,
    /// Settings with credentials redacted.
    pub backend_settings: Settings,
    pub status: EntityStatus,
    /// Number of indexes that reference this server.
    pub dependent_count: usize,
}

/// An index row in the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub server_id: String,
    pub server_label: String,
    pub status: EntityStatus,
    pub field_count: usize,
    pub processor_count: usize,
    /// True when both the index and its server are enabled.
    pub reachable: bool,
}

/// Point-in-time snapshot of the search configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub servers: Vec<ServerSummary>,
    pub indexes: Vec<IndexSummary>,
    pub local_actions: Vec<LocalAction>,
}

impl Overview {
    pub fn server(&self, id: &str) -> Option<&ServerSummary> {
        self.servers.iter().find(|s| s.id == id)
    }

    pub fn index(&self, id: &str) -> Option<&IndexSummary> {
        self.indexes.iter().find(|i| i.id == id)
    }
}

/// Entry point for operator tooling.
///
/// Reads are open to every actor. Mutations go through [`servers`](Self::servers)
/// and [`indexes`](Self::indexes), which check the admin capability themselves.
#[derive(Clone)]
pub struct AdminSurface {
    servers: Arc<ServerRegistry>,
    indexes: Arc<IndexRegistry>,
}

impl AdminSurface {
    pub fn new(servers: Arc<ServerRegistry>, indexes: Arc<IndexRegistry>) -> Self {
        Self { servers, indexes }
    }

    pub fn servers(&self) -> &ServerRegistry {
        &self.servers
    }

    pub fn indexes(&self) -> &IndexRegistry {
        &self.indexes
    }

    /// Local actions offered to `actor`.
    pub fn local_actions(&self, actor: &Actor) -> Vec<LocalAction> {
        if authorize(&actor.capabilities, ADMINISTER_SEARCH_CONFIGURATION) {
            vec![
                LocalAction::new("Add server", ADD_SERVER_PATH),
                LocalAction::new("Add index", ADD_INDEX_PATH),
            ]
        } else {
            Vec::new()
        }
    }

    /// Snapshot of every server and index.
    pub async fn list_overview(&self, actor: &Actor) -> Result<Overview, SeekwellError> {
        let indexes = self.indexes.list_indexes().await?;
        let mut servers: Vec<ServerConfig> = self.servers.list_servers().await?;

        // Servers created between the two reads are fetched individually.
        // A server deleted in that window takes its index rows with it.
        let mut by_id: HashMap<String, usize> = servers
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        for index in &indexes {
            if by_id.contains_key(&index.server_id) {
                continue;
            }
            match self.servers.get_server(&index.server_id).await {
                Ok(server) => {
                    by_id.insert(server.id.clone(), servers.len());
                    servers.push(server);
                }
                Err(SeekwellError::NotFound { .. }) => {
                    debug!(index = %index.id, server = %index.server_id, "dropping orphaned index row");
                }
                Err(e) => return Err(e),
            }
        }

        let mut dependents: HashMap<&str, usize> = HashMap::new();
        for index in &indexes {
            *dependents.entry(index.server_id.as_str()).or_default() += 1;
        }

        let index_rows = indexes
            .iter()
            .filter_map(|index| {
                let server = by_id.get(&index.server_id).map(|&i| &servers[i])?;
                Some(IndexSummary {
                    id: index.id.clone(),
                    label: index.label.clone(),
                    description: index.description.clone(),
                    server_id: index.server_id.clone(),
                    server_label: server.label.clone(),
                    status: index.status,
                    field_count: index.fields.len(),
                    processor_count: index.processors.len(),
                    reachable: index.status.is_enabled() && server.status.is_enabled(),
                })
            })
            .collect();

        let server_rows = servers
            .iter()
            .map(|server| ServerSummary {
                id: server.id.clone(),
                label: server.label.clone(),
                description: server.description.clone(),
                backend_type: server.backend_type,
                backend_settings: redact_settings(&server.backend_settings),
                status: server.status,
                dependent_count: dependents.get(server.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        Ok(Overview {
            servers: server_rows,
            indexes: index_rows,
            local_actions: self.local_actions(actor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::locks::EntityLocks;
    use crate::servers::NewServer;
    use seekwell_backend::{BackendCatalog, DatabaseBackend};
    use seekwell_config::model::StorageConfig;
    use seekwell_core::{
        AdapterType, ConfigEntity, ConfigStore, EntityCursor, EntityKind, HealthStatus,
        IndexConfig, PluginAdapter,
    };
    use seekwell_storage::SqliteConfigStore;
    use serde_json::json;

    async fn sqlite() -> Arc<dyn ConfigStore> {
        Arc::new(
            SqliteConfigStore::open(StorageConfig {
                database_path: ":memory:".to_string(),
                wal_mode: false,
            })
            .await
            .unwrap(),
        )
    }

    /// Deletes `i1` and then `s1` right after handing out the last index page.
    struct DeleteAfterIndexRead {
        inner: Arc<dyn ConfigStore>,
        armed: AtomicBool,
    }

    #[async_trait]
    impl PluginAdapter for DeleteAfterIndexRead {
        fn name(&self) -> &str {
            "delete-after-index-read"
        }

        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Storage
        }

        async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
            self.inner.health_check().await
        }

        async fn shutdown(&self) -> Result<(), SeekwellError> {
            self.inner.shutdown().await
        }
    }

    #[async_trait]
    impl ConfigStore for DeleteAfterIndexRead {
        async fn initialize(&self) -> Result<(), SeekwellError> {
            self.inner.initialize().await
        }

        async fn close(&self) -> Result<(), SeekwellError> {
            self.inner.close().await
        }

        async fn put(&self, entity: &ConfigEntity) -> Result<(), SeekwellError> {
            self.inner.put(entity).await
        }

        async fn get(&self, kind: EntityKind, id: &str) -> Result<ConfigEntity, SeekwellError> {
            self.inner.get(kind, id).await
        }

        async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool, SeekwellError> {
            self.inner.exists(kind, id).await
        }

        async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SeekwellError> {
            self.inner.delete(kind, id).await
        }

        async fn list_page(
            &self,
            kind: EntityKind,
            after: Option<i64>,
            limit: usize,
        ) -> Result<Vec<(i64, ConfigEntity)>, SeekwellError> {
            let page = self.inner.list_page(kind, after, limit).await?;
            if kind == EntityKind::Index
                && page.len() < limit
                && self.armed.swap(false, Ordering::SeqCst)
            {
                self.inner.delete(EntityKind::Index, "i1").await?;
                self.inner.delete(EntityKind::Server, "s1").await?;
            }
            Ok(page)
        }

        async fn count_dependents(&self, server_id: &str) -> Result<usize, SeekwellError> {
            self.inner.count_dependents(server_id).await
        }

        fn list(&self, kind: EntityKind) -> EntityCursor<'_> {
            EntityCursor::new(self, kind)
        }
    }

    fn surface_over(store: Arc<dyn ConfigStore>) -> AdminSurface {
        let mut catalog = BackendCatalog::new();
        catalog.register(Arc::new(DatabaseBackend::new()));
        let locks = EntityLocks::new();
        let servers = Arc::new(ServerRegistry::new(store.clone(), catalog, locks.clone()));
        let indexes = Arc::new(IndexRegistry::new(store, servers.clone(), locks));
        AdminSurface::new(servers, indexes)
    }

    async fn surface() -> AdminSurface {
        surface_over(sqlite().await)
    }

    fn database_server(id: &str) -> NewServer {
        NewServer {
            id: id.to_string(),
            label: id.to_uppercase(),
            description: None,
            backend_type: "database".to_string(),
            backend_settings: Settings::new(),
            status: EntityStatus::Enabled,
        }
    }

    fn index_on(id: &str, server_id: &str) -> IndexConfig {
        IndexConfig {
            id: id.to_string(),
            label: id.to_uppercase(),
            description: None,
            server_id: server_id.to_string(),
            fields: vec![],
            processors: vec![],
            status: EntityStatus::Enabled,
        }
    }

    fn admin() -> Actor {
        Actor::new("admin", [ADMINISTER_SEARCH_CONFIGURATION])
    }

    #[tokio::test]
    async fn empty_overview_still_offers_actions_to_admins() {
        let admin_surface = surface().await;
        let overview = admin_surface.list_overview(&admin()).await.unwrap();
        assert!(overview.servers.is_empty());
        assert!(overview.indexes.is_empty());
        assert_eq!(
            overview.local_actions,
            vec![
                LocalAction::new("Add server", ADD_SERVER_PATH),
                LocalAction::new("Add index", ADD_INDEX_PATH),
            ]
        );

        let viewer = Actor::new("viewer", ["access administration pages"]);
        let overview = admin_surface.list_overview(&viewer).await.unwrap();
        assert!(overview.local_actions.is_empty());
    }

    #[tokio::test]
    async fn overview_redacts_and_counts() {
        let admin_surface = surface().await;
        let mut settings = Settings::new();
        settings.insert("password".into(), json!("hunter2"));
        settings.insert("min_chars".into(), json!(3));
        admin_surface
            .servers()
            .create_server(
                &admin(),
                NewServer {
                    id: "db".to_string(),
                    label: "Local DB".to_string(),
                    description: None,
                    backend_type: "database".to_string(),
                    backend_settings: settings,
                    status: EntityStatus::Disabled,
                },
            )
            .await
            .unwrap();
        admin_surface
            .indexes()
            .create_index(
                &admin(),
                IndexConfig {
                    id: "content".to_string(),
                    label: "Content".to_string(),
                    description: None,
                    server_id: "db".to_string(),
                    fields: vec![],
                    processors: vec![],
                    status: EntityStatus::Enabled,
                },
            )
            .await
            .unwrap();

        let overview = admin_surface.list_overview(&admin()).await.unwrap();
        let server = overview.server("db").unwrap();
        assert_eq!(server.dependent_count, 1);
        assert_eq!(server.backend_settings["password"], json!("[REDACTED]"));
        assert_eq!(server.backend_settings["min_chars"], json!(3));

        let index = overview.index("content").unwrap();
        assert_eq!(index.server_label, "Local DB");
        assert!(!index.reachable);
    }

    #[tokio::test]
    async fn overview_survives_deletes_between_reads() {
        let store = Arc::new(DeleteAfterIndexRead {
            inner: sqlite().await,
            armed: AtomicBool::new(false),
        });
        let admin_surface = surface_over(store.clone());
        for (server, index) in [("s1", "i1"), ("s2", "i2")] {
            admin_surface
                .servers()
                .create_server(&admin(), database_server(server))
                .await
                .unwrap();
            admin_surface
                .indexes()
                .create_index(&admin(), index_on(index, server))
                .await
                .unwrap();
        }
        store.armed.store(true, Ordering::SeqCst);

        let overview = admin_surface.list_overview(&admin()).await.unwrap();
        assert!(overview.index("i1").is_none());
        assert!(overview.server("s1").is_none());
        assert_eq!(overview.index("i2").unwrap().server_label, "S2");
        assert_eq!(overview.server("s2").unwrap().dependent_count, 1);
        assert!(!store.armed.load(Ordering::SeqCst));
    }
}
