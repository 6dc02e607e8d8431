// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server CRUD operations.

use rusqlite::{params, OptionalExtension, Row};
use seekwell_core::{EntityKind, SeekwellError, ServerConfig};

use crate::database::{map_call_err, Database, StoreError};
use crate::queries::{json_column, parse_column};

const SERVER_COLUMNS: &str =
    "seq, id, label, description, backend_type, backend_settings, status";

fn row_to_server(row: &Row<'_>) -> rusqlite::Result<(i64, ServerConfig)> {
    Ok((
        row.get(0)?,
        ServerConfig {
            id: row.get(1)?,
            label: row.get(2)?,
            description: row.get(3)?,
            backend_type: parse_column(row, 4)?,
            backend_settings: json_column(row, 5)?,
            status: parse_column(row, 6)?,
        },
    ))
}

/// Insert a server, or replace the one with the same id in place.
pub async fn upsert_server(db: &Database, server: &ServerConfig) -> Result<(), SeekwellError> {
    let server = server.clone();
    db.connection()
        .call(move |conn| -> Result<(), StoreError> {
            let settings = serde_json::to_string(&server.backend_settings)?;
            conn.execute(
                "INSERT INTO search_servers (id, label, description, backend_type, backend_settings, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    label = excluded.label,
                    description = excluded.description,
                    backend_type = excluded.backend_type,
                    backend_settings = excluded.backend_settings,
                    status = excluded.status",
                params![
                    server.id,
                    server.label,
                    server.description,
                    server.backend_type.to_string(),
                    settings,
                    server.status.to_string(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_call_err)
}

/// Get a server by id.
pub async fn get_server(db: &Database, id: &str) -> Result<Option<ServerConfig>, SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<ServerConfig>, StoreError> {
            let sql = format!("SELECT {SERVER_COLUMNS} FROM search_servers WHERE id = ?1");
            let server = conn
                .query_row(&sql, params![id], row_to_server)
                .optional()?
                .map(|(_, server)| server);
            Ok(server)
        })
        .await
        .map_err(map_call_err)
}

/// Returns true if a server with this id exists.
pub async fn server_exists(db: &Database, id: &str) -> Result<bool, SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, StoreError> {
            let found = conn
                .query_row(
                    "SELECT 1 FROM search_servers WHERE id = ?1",
                    params![id],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
        .map_err(map_call_err)
}

/// Delete a server unless an index still references it.
///
/// The reference check and the delete share one transaction.
pub async fn delete_server(db: &Database, id: &str) -> Result<(), SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), StoreError> {
            let tx = conn.transaction()?;
            let exists = tx
                .query_row(
                    "SELECT 1 FROM search_servers WHERE id = ?1",
                    params![id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !exists {
                return Err(SeekwellError::not_found(EntityKind::Server, id).into());
            }

            let dependents: i64 = tx.query_row(
                "SELECT COUNT(*) FROM search_indexes WHERE server_id = ?1",
                params![id],
                |row| row.get(0),
            )?;
            if dependents > 0 {
                return Err(SeekwellError::Conflict(format!(
                    "server `{id}` is used by {dependents} index(es)"
                ))
                .into());
            }

            tx.execute("DELETE FROM search_servers WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_call_err)
}

/// Fetch a page of servers in insertion order, after sequence `after`.
pub async fn list_servers_page(
    db: &Database,
    after: Option<i64>,
    limit: usize,
) -> Result<Vec<(i64, ServerConfig)>, SeekwellError> {
    let after = after.unwrap_or(0);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<(i64, ServerConfig)>, StoreError> {
            let sql = format!(
                "SELECT {SERVER_COLUMNS} FROM search_servers WHERE seq > ?1 ORDER BY seq LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let servers = stmt
                .query_map(params![after, limit], row_to_server)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(servers)
        })
        .await
        .map_err(map_call_err)
}

/// Count the indexes that reference a server.
pub async fn count_dependents(db: &Database, server_id: &str) -> Result<usize, SeekwellError> {
    let server_id = server_id.to_string();
    db.connection()
        .call(move |conn| -> Result<i64, StoreError> {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM search_indexes WHERE server_id = ?1",
                params![server_id],
                |row| row.get(0),
            )?)
        })
        .await
        .map_err(map_call_err)
        .map(|count| usize::try_from(count).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::IN_MEMORY;
    use seekwell_core::{BackendType, EntityStatus, Settings};

    fn make_server(id: &str) -> ServerConfig {
        let mut settings = Settings::new();
        settings.insert("url".into(), serde_json::json!("http://localhost:8983/solr/core1"));
        ServerConfig {
            id: id.to_string(),
            label: format!("Server {id}"),
            description: Some("primary".to_string()),
            backend_type: BackendType::Solr,
            backend_settings: settings,
            status: EntityStatus::Enabled,
        }
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrips() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        let server = make_server("solr_main");
        upsert_server(&db, &server).await.unwrap();

        let fetched = get_server(&db, "solr_main").await.unwrap();
        assert_eq!(fetched, Some(server));
        assert!(server_exists(&db, "solr_main").await.unwrap());
        assert!(!server_exists(&db, "other").await.unwrap());
    }

    #[tokio::test]
    async fn upsert_keeps_insertion_position() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        upsert_server(&db, &make_server("a")).await.unwrap();
        upsert_server(&db, &make_server("b")).await.unwrap();

        let mut updated = make_server("a");
        updated.label = "Renamed".to_string();
        upsert_server(&db, &updated).await.unwrap();

        let page = list_servers_page(&db, None, 10).await.unwrap();
        let ids: Vec<_> = page.iter().map(|(_, s)| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(page[0].1.label, "Renamed");
    }

    #[tokio::test]
    async fn list_page_respects_after_and_limit() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        for id in ["a", "b", "c"] {
            upsert_server(&db, &make_server(id)).await.unwrap();
        }
        let first = list_servers_page(&db, None, 2).await.unwrap();
        assert_eq!(first.len(), 2);
        let rest = list_servers_page(&db, Some(first[1].0), 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].1.id, "c");
    }

    #[tokio::test]
    async fn delete_missing_server_is_not_found() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        let err = delete_server(&db, "ghost").await.unwrap_err();
        assert!(matches!(err, SeekwellError::NotFound { kind: EntityKind::Server, .. }));
    }
}
