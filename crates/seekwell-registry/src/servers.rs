// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server lifecycle: creation with backend validation, updates, status, health.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use seekwell_backend::BackendCatalog;
use seekwell_core::{
    Actor, BackendType, ConfigEntity, ConfigStore, EntityKind, EntityStatus, HealthStatus,
    SeekwellError, ServerConfig, Settings,
};
use seekwell_security::require_admin;

use crate::locks::EntityLocks;

/// Request to create a server.
///
/// `backend_type` stays a raw string until the registry parses it, so an
/// unknown backend surfaces as `InvalidBackend` rather than a decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct NewServer {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub backend_type: String,
    #[serde(default)]
    pub backend_settings: Settings,
    #[serde(default)]
    pub status: EntityStatus,
}

impl From<ServerConfig> for NewServer {
    fn from(server: ServerConfig) -> Self {
        Self {
            id: server.id,
            label: server.label,
            description: server.description,
            backend_type: server.backend_type.to_string(),
            backend_settings: server.backend_settings,
            status: server.status,
        }
    }
}

/// Partial update of a server. Absent fields are left unchanged; the id and
/// backend type cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerUpdate {
    #[serde(default)]
    pub label: Option<String>,
    /// `Some(None)` clears the description.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub backend_settings: Option<Settings>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Result of a connectivity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerHealth {
    pub server_id: String,
    pub backend_type: BackendType,
    pub status: HealthStatus,
}

/// Registry of search servers, persisted through the config store.
pub struct ServerRegistry {
    store: Arc<dyn ConfigStore>,
    catalog: BackendCatalog,
    locks: EntityLocks,
}

impl ServerRegistry {
    pub fn new(store: Arc<dyn ConfigStore>, catalog: BackendCatalog, locks: EntityLocks) -> Self {
        Self {
            store,
            catalog,
            locks,
        }
    }

    pub fn catalog(&self) -> &BackendCatalog {
        &self.catalog
    }

    /// Create a server.
    ///
    /// An unreachable backend does not fail creation; it is logged.
    pub async fn create_server(
        &self,
        actor: &Actor,
        request: NewServer,
    ) -> Result<ServerConfig, SeekwellError> {
        require_admin(actor)?;

        let backend_type = BackendType::parse(&request.backend_type)?;
        let client = self.catalog.require(backend_type)?;
        let server = ServerConfig {
            id: request.id,
            label: request.label,
            description: request.description,
            backend_type,
            backend_settings: request.backend_settings,
            status: request.status,
        };
        server.validate()?;
        client.validate_settings(&server.backend_settings)?;

        let _guard = self.locks.lock(EntityKind::Server, &server.id).await;
        if self.store.exists(EntityKind::Server, &server.id).await? {
            return Err(SeekwellError::Conflict(format!(
                "server `{}` already exists",
                server.id
            )));
        }

        if !client.ping(&server.backend_settings).await {
            warn!(
                server = %server.id,
                backend = %backend_type,
                "backend unreachable; server created anyway"
            );
        }

        self.store.put(&ConfigEntity::from(server.clone())).await?;
        info!(actor = %actor.id, server = %server.id, backend = %backend_type, "server created");
        Ok(server)
    }

    pub async fn get_server(&self, id: &str) -> Result<ServerConfig, SeekwellError> {
        self.store.get(EntityKind::Server, id).await?.into_server()
    }

    /// All servers in insertion order.
    pub async fn list_servers(&self) -> Result<Vec<ServerConfig>, SeekwellError> {
        self.store
            .list(EntityKind::Server)
            .collect()
            .await?
            .into_iter()
            .map(ConfigEntity::into_server)
            .collect()
    }

    /// Update label, description, or backend settings. Id and backend type are fixed.
    pub async fn update_server(
        &self,
        actor: &Actor,
        id: &str,
        update: ServerUpdate,
    ) -> Result<ServerConfig, SeekwellError> {
        require_admin(actor)?;

        let _guard = self.locks.lock(EntityKind::Server, id).await;
        let mut server = self.get_server(id).await?;
        if let Some(label) = update.label {
            server.label = label;
        }
        if let Some(description) = update.description {
            server.description = description;
        }
        if let Some(settings) = update.backend_settings {
            self.catalog
                .require(server.backend_type)?
                .validate_settings(&settings)?;
            server.backend_settings = settings;
        }
        server.validate()?;

        self.store.put(&ConfigEntity::from(server.clone())).await?;
        info!(actor = %actor.id, server = %id, "server updated");
        Ok(server)
    }

    /// Delete a server. Fails with `Conflict` while indexes reference it.
    pub async fn delete_server(&self, actor: &Actor, id: &str) -> Result<(), SeekwellError> {
        require_admin(actor)?;

        {
            let _guard = self.locks.lock(EntityKind::Server, id).await;
            self.store.delete(EntityKind::Server, id).await?;
        }
        self.locks.prune();
        info!(actor = %actor.id, server = %id, "server deleted");
        Ok(())
    }

    /// Enable or disable a server.
    ///
    /// Indexes on a disabled server keep their own status but stop serving queries.
    pub async fn set_status(
        &self,
        actor: &Actor,
        id: &str,
        status: EntityStatus,
    ) -> Result<ServerConfig, SeekwellError> {
        require_admin(actor)?;

        let _guard = self.locks.lock(EntityKind::Server, id).await;
        let mut server = self.get_server(id).await?;
        if server.status != status {
            server.status = status;
            self.store.put(&ConfigEntity::from(server.clone())).await?;
            info!(actor = %actor.id, server = %id, %status, "server status changed");
        }
        Ok(server)
    }

    /// Number of indexes referencing a server.
    pub async fn dependent_count(&self, id: &str) -> Result<usize, SeekwellError> {
        self.store.count_dependents(id).await
    }

    /// Ping a server's backend. Disabled servers report unhealthy without a ping.
    pub async fn check_health(&self, id: &str) -> Result<ServerHealth, SeekwellError> {
        let server = self.get_server(id).await?;
        let status = if !server.status.is_enabled() {
            HealthStatus::Unhealthy("server is disabled".to_string())
        } else {
            match self.catalog.get(server.backend_type) {
                None => HealthStatus::Unhealthy(format!(
                    "no client registered for backend `{}`",
                    server.backend_type
                )),
                Some(client) if client.ping(&server.backend_settings).await => {
                    HealthStatus::Healthy
                }
                Some(_) => {
                    warn!(server = %id, backend = %server.backend_type, "backend unreachable");
                    HealthStatus::Unhealthy("backend unreachable".to_string())
                }
            }
        };
        Ok(ServerHealth {
            server_id: server.id,
            backend_type: server.backend_type,
            status,
        })
    }
}
