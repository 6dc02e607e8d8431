// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index lifecycle: creation bound to a server, field schema, processor pipeline.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use seekwell_core::{
    Actor, ConfigEntity, ConfigStore, EntityKind, EntityStatus, FieldDefinition, IndexConfig,
    ProcessorRef, SeekwellError, ServerConfig,
};
use seekwell_security::require_admin;

use crate::locks::EntityLocks;
use crate::servers::ServerRegistry;

/// An index resolved together with the server that answers its queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryTarget {
    pub index: IndexConfig,
    pub server: ServerConfig,
}

/// Registry of search indexes, persisted through the config store.
pub struct IndexRegistry {
    store: Arc<dyn ConfigStore>,
    servers: Arc<ServerRegistry>,
    locks: EntityLocks,
}

impl IndexRegistry {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        servers: Arc<ServerRegistry>,
        locks: EntityLocks,
    ) -> Self {
        Self {
            store,
            servers,
            locks,
        }
    }

    /// Create an index on an existing server.
    pub async fn create_index(
        &self,
        actor: &Actor,
        index: IndexConfig,
    ) -> Result<IndexConfig, SeekwellError> {
        require_admin(actor)?;
        index.validate()?;

        let _guard = self.locks.lock(EntityKind::Index, &index.id).await;
        self.servers.get_server(&index.server_id).await?;
        if self.store.exists(EntityKind::Index, &index.id).await? {
            return Err(SeekwellError::Conflict(format!(
                "index `{}` already exists",
                index.id
            )));
        }

        self.store.put(&ConfigEntity::from(index.clone())).await?;
        info!(actor = %actor.id, index = %index.id, server = %index.server_id, "index created");
        Ok(index)
    }

    pub async fn get_index(&self, id: &str) -> Result<IndexConfig, SeekwellError> {
        self.store.get(EntityKind::Index, id).await?.into_index()
    }

    /// All indexes in insertion order.
    pub async fn list_indexes(&self) -> Result<Vec<IndexConfig>, SeekwellError> {
        self.store
            .list(EntityKind::Index)
            .collect()
            .await?
            .into_iter()
            .map(ConfigEntity::into_index)
            .collect()
    }

    /// Insert a field at `position`, or append it when no position is given.
    pub async fn add_field(
        &self,
        actor: &Actor,
        id: &str,
        field: FieldDefinition,
        position: Option<usize>,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "field added", |index| {
            if index.fields.iter().any(|f| f.name == field.name) {
                return Err(SeekwellError::Validation(format!(
                    "index `{}` already has a field `{}`",
                    index.id, field.name
                )));
            }
            insert_at(&mut index.fields, field, position)
        })
        .await
    }

    pub async fn remove_field(
        &self,
        actor: &Actor,
        id: &str,
        name: &str,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "field removed", |index| {
            let pos = index
                .fields
                .iter()
                .position(|f| f.name == name)
                .ok_or_else(|| {
                    SeekwellError::Validation(format!(
                        "index `{}` has no field `{name}`",
                        index.id
                    ))
                })?;
            index.fields.remove(pos);
            Ok(())
        })
        .await
    }

    /// Insert a processor at `position`, or append it when no position is given.
    pub async fn add_processor(
        &self,
        actor: &Actor,
        id: &str,
        processor: ProcessorRef,
        position: Option<usize>,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "processor added", |index| {
            if index.processors.iter().any(|p| p.id == processor.id) {
                return Err(SeekwellError::Validation(format!(
                    "index `{}` already has a processor `{}`",
                    index.id, processor.id
                )));
            }
            insert_at(&mut index.processors, processor, position)
        })
        .await
    }

    pub async fn remove_processor(
        &self,
        actor: &Actor,
        id: &str,
        processor_id: &str,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "processor removed", |index| {
            let pos = index
                .processors
                .iter()
                .position(|p| p.id == processor_id)
                .ok_or_else(|| {
                    SeekwellError::Validation(format!(
                        "index `{}` has no processor `{processor_id}`",
                        index.id
                    ))
                })?;
            index.processors.remove(pos);
            Ok(())
        })
        .await
    }

    /// Reorder the pipeline. `order` must be a permutation of the current processor ids.
    pub async fn reorder_processors(
        &self,
        actor: &Actor,
        id: &str,
        order: Vec<String>,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "processors reordered", |index| {
            let current: BTreeSet<&str> = index.processors.iter().map(|p| p.id.as_str()).collect();
            let requested: BTreeSet<&str> = order.iter().map(String::as_str).collect();
            if order.len() != index.processors.len() || current != requested {
                return Err(SeekwellError::Validation(format!(
                    "processor order for index `{}` must list each of [{}] exactly once",
                    index.id,
                    current.into_iter().collect::<Vec<_>>().join(", ")
                )));
            }

            let mut remaining = std::mem::take(&mut index.processors);
            for pid in &order {
                if let Some(pos) = remaining.iter().position(|p| &p.id == pid) {
                    index.processors.push(remaining.swap_remove(pos));
                }
            }
            Ok(())
        })
        .await
    }

    pub async fn set_status(
        &self,
        actor: &Actor,
        id: &str,
        status: EntityStatus,
    ) -> Result<IndexConfig, SeekwellError> {
        self.modify(actor, id, "index status changed", |index| {
            index.status = status;
            Ok(())
        })
        .await
    }

    /// Delete an index. Nothing references indexes, so this never conflicts.
    pub async fn delete_index(&self, actor: &Actor, id: &str) -> Result<(), SeekwellError> {
        require_admin(actor)?;

        {
            let _guard = self.locks.lock(EntityKind::Index, id).await;
            self.store.delete(EntityKind::Index, id).await?;
        }
        self.locks.prune();
        info!(actor = %actor.id, index = %id, "index deleted");
        Ok(())
    }

    /// Resolve an index and its server for querying.
    ///
    /// Fails with `BackendUnavailable` when the server or the index is disabled.
    pub async fn query_target(&self, id: &str) -> Result<QueryTarget, SeekwellError> {
        let index = self.get_index(id).await?;
        let server = self.servers.get_server(&index.server_id).await?;
        if !server.status.is_enabled() || !index.status.is_enabled() {
            return Err(SeekwellError::BackendUnavailable {
                index: index.id,
                server: server.id,
            });
        }
        Ok(QueryTarget { index, server })
    }

    /// Locked read-modify-write of one index.
    async fn modify<F>(
        &self,
        actor: &Actor,
        id: &str,
        what: &'static str,
        edit: F,
    ) -> Result<IndexConfig, SeekwellError>
    where
        F: FnOnce(&mut IndexConfig) -> Result<(), SeekwellError>,
    {
        require_admin(actor)?;

        let _guard = self.locks.lock(EntityKind::Index, id).await;
        let mut index = self.get_index(id).await?;
        edit(&mut index)?;
        index.validate()?;
        self.store.put(&ConfigEntity::from(index.clone())).await?;
        info!(actor = %actor.id, index = %id, "{what}");
        Ok(index)
    }
}

fn insert_at<T>(items: &mut Vec<T>, item: T, position: Option<usize>) -> Result<(), SeekwellError> {
    match position {
        None => items.push(item),
        Some(pos) if pos <= items.len() => items.insert(pos, item),
        Some(pos) => {
            return Err(SeekwellError::Validation(format!(
                "position {pos} is past the end (length {})",
                items.len()
            )));
        }
    }
    Ok(())
}
