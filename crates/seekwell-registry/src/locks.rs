// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-entity async locks for read-modify-write operations.

use std::sync::Arc;

use dashmap::DashMap;
use seekwell_core::EntityKind;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async mutexes keyed by `(kind, id)`.
///
/// Edits to one entity are serialized; edits to different entities proceed in
/// parallel. Clones share the same lock table.
#[derive(Clone, Default)]
pub struct EntityLocks {
    inner: Arc<DashMap<(EntityKind, String), Arc<Mutex<()>>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one entity.
    pub async fn lock(&self, kind: EntityKind, id: &str) -> OwnedMutexGuard<()> {
        let mutex = self
            .inner
            .entry((kind, id.to_string()))
            .or_default()
            .clone();
        mutex.lock_owned().await
    }

    /// Drop lock entries nobody is holding or waiting on.
    pub fn prune(&self) {
        self.inner.retain(|_, mutex| Arc::strong_count(mutex) > 1);
    }

    /// Number of tracked entities.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_entity_is_exclusive() {
        let locks = EntityLocks::new();
        let guard = locks.lock(EntityKind::Index, "content").await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.lock(EntityKind::Index, "content").await;
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn different_entities_do_not_block() {
        let locks = EntityLocks::new();
        let _a = locks.lock(EntityKind::Index, "a").await;
        let _b = locks.lock(EntityKind::Index, "b").await;
        let _server_a = locks.lock(EntityKind::Server, "a").await;
        assert_eq!(locks.len(), 3);
    }

    #[tokio::test]
    async fn prune_keeps_held_locks() {
        let locks = EntityLocks::new();
        let held = locks.lock(EntityKind::Server, "held").await;
        drop(locks.lock(EntityKind::Server, "released").await);

        locks.prune();
        assert_eq!(locks.len(), 1);
        drop(held);
        locks.prune();
        assert!(locks.is_empty());
    }
}
