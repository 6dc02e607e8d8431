// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use seekwell_core::SeekwellError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Path value that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Errors raised inside a connection closure.
///
/// Domain errors (not found, conflict) travel through the closure unchanged so
/// the checks can run in the same transaction as the write they guard.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Migration(#[from] refinery::Error),
    #[error(transparent)]
    Domain(#[from] SeekwellError),
}

/// Convert a failed connection call into a [`SeekwellError`].
pub(crate) fn map_call_err(e: tokio_rusqlite::Error<StoreError>) -> SeekwellError {
    match e {
        tokio_rusqlite::Error::Error(StoreError::Domain(err)) => err,
        tokio_rusqlite::Error::Error(StoreError::Sql(err)) => SeekwellError::Storage {
            source: Box::new(err),
        },
        tokio_rusqlite::Error::Error(StoreError::Json(err)) => SeekwellError::Storage {
            source: Box::new(err),
        },
        tokio_rusqlite::Error::Error(StoreError::Migration(err)) => SeekwellError::Storage {
            source: Box::new(err),
        },
        other => SeekwellError::Storage {
            source: other.to_string().into(),
        },
    }
}

/// Handle to the single SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` in WAL mode and run migrations.
    pub async fn open(path: &str) -> Result<Self, SeekwellError> {
        Self::open_with(path, true).await
    }

    /// Open the database, choosing the journal mode explicitly.
    ///
    /// `path` may be [`IN_MEMORY`]; WAL is skipped for in-memory databases.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, SeekwellError> {
        let in_memory = path == IN_MEMORY;
        let conn = if in_memory {
            Connection::open_in_memory().await
        } else {
            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| SeekwellError::Storage {
                    source: Box::new(e),
                })?;
            }
            Connection::open(path).await
        }
        .map_err(|e| SeekwellError::Storage {
            source: Box::new(e),
        })?;

        let use_wal = wal_mode && !in_memory;
        conn.call(move |conn| -> Result<(), StoreError> {
            if use_wal {
                let mode: String =
                    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
            migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(map_call_err)?;

        debug!(path, wal = use_wal, "database opened");
        Ok(Self { conn })
    }

    /// The underlying connection. All calls run on its single background thread.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL so the main database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), SeekwellError> {
        self.conn
            .call(|conn| -> Result<(), StoreError> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_call_err)
    }

    /// Close the connection, consuming the handle.
    pub async fn close(self) -> Result<(), SeekwellError> {
        self.conn.close().await.map_err(|e| SeekwellError::Storage {
            source: e.to_string().into(),
        })
    }
}
