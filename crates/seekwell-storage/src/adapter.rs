// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ConfigStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use seekwell_config::model::StorageConfig;
use seekwell_core::{
    AdapterType, ConfigEntity, ConfigStore, EntityCursor, EntityKind, HealthStatus,
    PluginAdapter, SeekwellError,
};

use crate::database::{map_call_err, Database, StoreError};
use crate::queries;

/// SQLite-backed config store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules. The
/// database is opened on the first call to [`ConfigStore::initialize`].
pub struct SqliteConfigStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteConfigStore {
    /// Create a new store. The database is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the store immediately.
    pub async fn open(config: StorageConfig) -> Result<Self, SeekwellError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    fn db(&self) -> Result<&Database, SeekwellError> {
        self.db.get().ok_or_else(|| SeekwellError::Storage {
            source: "config store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteConfigStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), StoreError> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_call_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SeekwellError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn initialize(&self) -> Result<(), SeekwellError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| SeekwellError::Storage {
            source: "config store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite config store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), SeekwellError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn put(&self, entity: &ConfigEntity) -> Result<(), SeekwellError> {
        entity.validate()?;
        let db = self.db()?;
        match entity {
            ConfigEntity::Server(server) => queries::servers::upsert_server(db, server).await,
            ConfigEntity::Index(index) => queries::indexes::upsert_index(db, index).await,
        }
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<ConfigEntity, SeekwellError> {
        let db = self.db()?;
        let found = match kind {
            EntityKind::Server => queries::servers::get_server(db, id)
                .await?
                .map(ConfigEntity::from),
            EntityKind::Index => queries::indexes::get_index(db, id)
                .await?
                .map(ConfigEntity::from),
        };
        found.ok_or_else(|| SeekwellError::not_found(kind, id))
    }

    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool, SeekwellError> {
        let db = self.db()?;
        match kind {
            EntityKind::Server => queries::servers::server_exists(db, id).await,
            EntityKind::Index => queries::indexes::index_exists(db, id).await,
        }
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SeekwellError> {
        let db = self.db()?;
        match kind {
            EntityKind::Server => queries::servers::delete_server(db, id).await,
            EntityKind::Index => queries::indexes::delete_index(db, id).await,
        }
    }

    async fn list_page(
        &self,
        kind: EntityKind,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<(i64, ConfigEntity)>, SeekwellError> {
        let db = self.db()?;
        let page = match kind {
            EntityKind::Server => queries::servers::list_servers_page(db, after, limit)
                .await?
                .into_iter()
                .map(|(seq, s)| (seq, ConfigEntity::from(s)))
                .collect(),
            EntityKind::Index => queries::indexes::list_indexes_page(db, after, limit)
                .await?
                .into_iter()
                .map(|(seq, i)| (seq, ConfigEntity::from(i)))
                .collect(),
        };
        Ok(page)
    }

    async fn count_dependents(&self, server_id: &str) -> Result<usize, SeekwellError> {
        queries::servers::count_dependents(self.db()?, server_id).await
    }

    fn list(&self, kind: EntityKind) -> EntityCursor<'_> {
        EntityCursor::new(self, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekwell_core::{
        BackendType, EntityStatus, FieldDefinition, FieldType, IndexConfig, ServerConfig,
        Settings,
    };
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn server(id: &str) -> ConfigEntity {
        ServerConfig {
            id: id.to_string(),
            label: format!("Server {id}"),
            description: None,
            backend_type: BackendType::Database,
            backend_settings: Settings::new(),
            status: EntityStatus::Enabled,
        }
        .into()
    }

    fn index(id: &str, server_id: &str) -> ConfigEntity {
        IndexConfig {
            id: id.to_string(),
            label: format!("Index {id}"),
            description: None,
            server_id: server_id.to_string(),
            fields: vec![FieldDefinition::new("title", FieldType::Text)],
            processors: vec![],
            status: EntityStatus::Enabled,
        }
        .into()
    }

    async fn open_store(dir: &tempfile::TempDir) -> SqliteConfigStore {
        let path = dir.path().join("store.db");
        SqliteConfigStore::open(make_config(path.to_str().unwrap()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn implements_plugin_adapter() {
        let store = SqliteConfigStore::new(make_config("unused.db"));
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Storage);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let store = SqliteConfigStore::new(make_config("never-opened.db"));
        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn put_get_exists_delete() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;

        store.put(&server("main")).await.unwrap();
        store.put(&index("content", "main")).await.unwrap();

        assert_eq!(store.get(EntityKind::Server, "main").await.unwrap(), server("main"));
        assert_eq!(
            store.get(EntityKind::Index, "content").await.unwrap(),
            index("content", "main")
        );
        assert!(store.exists(EntityKind::Index, "content").await.unwrap());
        assert_eq!(store.count_dependents("main").await.unwrap(), 1);

        store.delete(EntityKind::Index, "content").await.unwrap();
        assert!(!store.exists(EntityKind::Index, "content").await.unwrap());
        assert_eq!(health(&store).await, HealthStatus::Healthy);
        store.close().await.unwrap();
    }

    async fn health(store: &SqliteConfigStore) -> HealthStatus {
        store.health_check().await.unwrap()
    }

    #[tokio::test]
    async fn server_and_index_ids_are_separate_namespaces() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        store.put(&server("shared")).await.unwrap();
        store.put(&index("shared", "shared")).await.unwrap();

        assert!(store.exists(EntityKind::Server, "shared").await.unwrap());
        assert!(store.exists(EntityKind::Index, "shared").await.unwrap());
    }

    #[tokio::test]
    async fn put_rejects_invalid_entity() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let mut bad = server("main").into_server().unwrap();
        bad.label = "   ".to_string();
        let err = store.put(&bad.into()).await.unwrap_err();
        assert!(matches!(err, SeekwellError::Validation(_)));
        assert!(!store.exists(EntityKind::Server, "main").await.unwrap());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let err = store.get(EntityKind::Index, "missing").await.unwrap_err();
        assert!(matches!(err, SeekwellError::NotFound { kind: EntityKind::Index, .. }));
    }

    #[tokio::test]
    async fn referenced_server_delete_conflicts() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        store.put(&server("main")).await.unwrap();
        store.put(&index("content", "main")).await.unwrap();

        let err = store.delete(EntityKind::Server, "main").await.unwrap_err();
        assert!(matches!(err, SeekwellError::Conflict(_)));
        assert!(store.exists(EntityKind::Server, "main").await.unwrap());
    }

    #[tokio::test]
    async fn cursor_pages_through_all_entities_and_restarts() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir).await;
        let ids: Vec<String> = (0..7).map(|i| format!("server_{i}")).collect();
        for id in &ids {
            store.put(&server(id)).await.unwrap();
        }

        let mut cursor = store.list(EntityKind::Server).with_page_size(3);
        let mut seen = Vec::new();
        while let Some(entity) = cursor.next().await.unwrap() {
            seen.push(entity.id().to_string());
        }
        assert_eq!(seen, ids);

        cursor.rewind();
        let first = cursor.next().await.unwrap().unwrap();
        assert_eq!(first.id(), "server_0");
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = open_store(&dir).await;
            store.put(&server("main")).await.unwrap();
            store.shutdown().await.unwrap();
        }
        let store = open_store(&dir).await;
        let all = store.list(EntityKind::Server).collect().await.unwrap();
        assert_eq!(all, vec![server("main")]);
    }
}
