// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config store trait and the lazy listing cursor built on top of it.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::SeekwellError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConfigEntity, EntityKind};

/// Default number of entities fetched per page by [`EntityCursor`].
pub const DEFAULT_PAGE_SIZE: usize = 64;

/// Persistence for server and index configuration entities.
///
/// The store exclusively owns persisted entities. Every method is atomic at
/// single-entity granularity; referential checks run in the same write as the
/// mutation they guard.
#[async_trait]
pub trait ConfigStore: PluginAdapter {
    /// Initializes the store (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), SeekwellError>;

    /// Closes the store, flushing pending writes.
    async fn close(&self) -> Result<(), SeekwellError>;

    /// Inserts or replaces an entity by `(kind, id)`.
    ///
    /// Fails with `Validation` when required fields are missing and with
    /// `NotFound` when an index references a server that does not exist.
    /// Replacing an entity keeps its original insertion position.
    async fn put(&self, entity: &ConfigEntity) -> Result<(), SeekwellError>;

    /// Fetches an entity, failing with `NotFound` if absent.
    async fn get(&self, kind: EntityKind, id: &str) -> Result<ConfigEntity, SeekwellError>;

    /// Returns true if an entity exists.
    async fn exists(&self, kind: EntityKind, id: &str) -> Result<bool, SeekwellError>;

    /// Deletes an entity.
    ///
    /// Fails with `Conflict` if another entity references it and with
    /// `NotFound` if it does not exist.
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), SeekwellError>;

    /// Fetches up to `limit` entities inserted after insertion sequence `after`.
    ///
    /// Each entity is paired with its insertion sequence number.
    async fn list_page(
        &self,
        kind: EntityKind,
        after: Option<i64>,
        limit: usize,
    ) -> Result<Vec<(i64, ConfigEntity)>, SeekwellError>;

    /// Number of indexes referencing the given server.
    async fn count_dependents(&self, server_id: &str) -> Result<usize, SeekwellError>;

    /// Lazily lists all entities of a kind in insertion order.
    fn list(&self, kind: EntityKind) -> EntityCursor<'_>;
}

/// A lazy, restartable sequence over the entities of one kind.
///
/// Pages are fetched from the store on demand. Entities inserted while the
/// cursor is open show up if they land after the current position.
pub struct EntityCursor<'a> {
    store: &'a dyn ConfigStore,
    kind: EntityKind,
    page_size: usize,
    after: Option<i64>,
    buffer: VecDeque<ConfigEntity>,
    exhausted: bool,
}

impl<'a> EntityCursor<'a> {
    pub fn new(store: &'a dyn ConfigStore, kind: EntityKind) -> Self {
        Self {
            store,
            kind,
            page_size: DEFAULT_PAGE_SIZE,
            after: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Sets the number of entities fetched per round trip (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns the next entity, fetching a new page when the buffer runs dry.
    pub async fn next(&mut self) -> Result<Option<ConfigEntity>, SeekwellError> {
        if self.buffer.is_empty() && !self.exhausted {
            let page = self
                .store
                .list_page(self.kind, self.after, self.page_size)
                .await?;
            if page.len() < self.page_size {
                self.exhausted = true;
            }
            if let Some((seq, _)) = page.last() {
                self.after = Some(*seq);
            }
            self.buffer.extend(page.into_iter().map(|(_, entity)| entity));
        }
        Ok(self.buffer.pop_front())
    }

    /// Restarts the sequence from the first entity.
    pub fn rewind(&mut self) {
        self.after = None;
        self.buffer.clear();
        self.exhausted = false;
    }

    /// Drains the remaining entities into a vector.
    pub async fn collect(mut self) -> Result<Vec<ConfigEntity>, SeekwellError> {
        let mut entities = Vec::new();
        while let Some(entity) = self.next().await? {
            entities.push(entity);
        }
        Ok(entities)
    }
}
