// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index CRUD operations.

use rusqlite::{params, OptionalExtension, Row};
use seekwell_core::{EntityKind, IndexConfig, SeekwellError};

use crate::database::{map_call_err, Database, StoreError};
use crate::queries::{json_column, parse_column};

const INDEX_COLUMNS: &str =
    "seq, id, label, description, server_id, fields, processors, status";

fn row_to_index(row: &Row<'_>) -> rusqlite::Result<(i64, IndexConfig)> {
    Ok((
        row.get(0)?,
        IndexConfig {
            id: row.get(1)?,
            label: row.get(2)?,
            description: row.get(3)?,
            server_id: row.get(4)?,
            fields: json_column(row, 5)?,
            processors: json_column(row, 6)?,
            status: parse_column(row, 7)?,
        },
    ))
}

/// Insert an index, or replace the one with the same id in place.
///
/// Fails with `NotFound` if the referenced server does not exist. The check
/// runs in the same transaction as the write.
pub async fn upsert_index(db: &Database, index: &IndexConfig) -> Result<(), SeekwellError> {
    let index = index.clone();
    db.connection()
        .call(move |conn| -> Result<(), StoreError> {
            let fields = serde_json::to_string(&index.fields)?;
            let processors = serde_json::to_string(&index.processors)?;

            let tx = conn.transaction()?;
            let server_found = tx
                .query_row(
                    "SELECT 1 FROM search_servers WHERE id = ?1",
                    params![index.server_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !server_found {
                return Err(SeekwellError::not_found(EntityKind::Server, index.server_id).into());
            }

            tx.execute(
                "INSERT INTO search_indexes (id, label, description, server_id, fields, processors, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    label = excluded.label,
                    description = excluded.description,
                    server_id = excluded.server_id,
                    fields = excluded.fields,
                    processors = excluded.processors,
                    status = excluded.status",
                params![
                    index.id,
                    index.label,
                    index.description,
                    index.server_id,
                    fields,
                    processors,
                    index.status.to_string(),
                ],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_call_err)
}

/// Get an index by id.
pub async fn get_index(db: &Database, id: &str) -> Result<Option<IndexConfig>, SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<IndexConfig>, StoreError> {
            let sql = format!("SELECT {INDEX_COLUMNS} FROM search_indexes WHERE id = ?1");
            let index = conn
                .query_row(&sql, params![id], row_to_index)
                .optional()?
                .map(|(_, index)| index);
            Ok(index)
        })
        .await
        .map_err(map_call_err)
}

pub async fn index_exists(db: &Database, id: &str) -> Result<bool, SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<bool, StoreError> {
            let found = conn
                .query_row(
                    "SELECT 1 FROM search_indexes WHERE id = ?1",
                    params![id],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
        .map_err(map_call_err)
}

/// Delete an index. Fails with `NotFound` if it does not exist.
pub async fn delete_index(db: &Database, id: &str) -> Result<(), SeekwellError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), StoreError> {
            let deleted = conn.execute("DELETE FROM search_indexes WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(SeekwellError::not_found(EntityKind::Index, id).into());
            }
            Ok(())
        })
        .await
        .map_err(map_call_err)
}

/// Fetch a page of indexes in insertion order, after sequence `after`.
pub async fn list_indexes_page(
    db: &Database,
    after: Option<i64>,
    limit: usize,
) -> Result<Vec<(i64, IndexConfig)>, SeekwellError> {
    let after = after.unwrap_or(0);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| -> Result<Vec<(i64, IndexConfig)>, StoreError> {
            let sql = format!(
                "SELECT {INDEX_COLUMNS} FROM search_indexes WHERE seq > ?1 ORDER BY seq LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let indexes = stmt
                .query_map(params![after, limit], row_to_index)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(indexes)
        })
        .await
        .map_err(map_call_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::IN_MEMORY;
    use crate::queries::servers;
    use seekwell_core::{
        BackendType, EntityStatus, FieldDefinition, FieldType, ProcessorRef, ServerConfig,
        Settings,
    };

    async fn db_with_server(server_id: &str) -> Database {
        let db = Database::open(IN_MEMORY).await.unwrap();
        let server = ServerConfig {
            id: server_id.to_string(),
            label: "Main".to_string(),
            description: None,
            backend_type: BackendType::Database,
            backend_settings: Settings::new(),
            status: EntityStatus::Enabled,
        };
        servers::upsert_server(&db, &server).await.unwrap();
        db
    }

    fn make_index(id: &str, server_id: &str) -> IndexConfig {
        let mut stemmer = ProcessorRef::new("stemmer");
        stemmer
            .settings
            .insert("language".into(), serde_json::json!("en"));
        IndexConfig {
            id: id.to_string(),
            label: format!("Index {id}"),
            description: None,
            server_id: server_id.to_string(),
            fields: vec![
                FieldDefinition::new("title", FieldType::Text),
                FieldDefinition::new("created", FieldType::Date),
            ],
            processors: vec![ProcessorRef::new("html_filter"), stemmer],
            status: EntityStatus::Disabled,
        }
    }

    #[tokio::test]
    async fn upsert_and_get_preserves_fields_and_processors() {
        let db = db_with_server("main").await;
        let index = make_index("content", "main");
        upsert_index(&db, &index).await.unwrap();

        let fetched = get_index(&db, "content").await.unwrap().unwrap();
        assert_eq!(fetched, index);
        assert!(index_exists(&db, "content").await.unwrap());
    }

    #[tokio::test]
    async fn upsert_with_missing_server_is_not_found() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        let err = upsert_index(&db, &make_index("content", "ghost"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, SeekwellError::NotFound { kind: EntityKind::Server, ref id } if id == "ghost")
        );
        assert!(!index_exists(&db, "content").await.unwrap());
    }

    #[tokio::test]
    async fn server_with_index_cannot_be_deleted() {
        let db = db_with_server("main").await;
        upsert_index(&db, &make_index("content", "main")).await.unwrap();

        let err = servers::delete_server(&db, "main").await.unwrap_err();
        assert!(matches!(err, SeekwellError::Conflict(_)));
        assert_eq!(servers::count_dependents(&db, "main").await.unwrap(), 1);

        delete_index(&db, "content").await.unwrap();
        servers::delete_server(&db, "main").await.unwrap();
        assert!(!servers::server_exists(&db, "main").await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_index_is_not_found() {
        let db = Database::open(IN_MEMORY).await.unwrap();
        let err = delete_index(&db, "nope").await.unwrap_err();
        assert!(matches!(err, SeekwellError::NotFound { kind: EntityKind::Index, .. }));
    }

    #[tokio::test]
    async fn list_page_is_in_insertion_order() {
        let db = db_with_server("main").await;
        for id in ["zeta", "alpha", "mid"] {
            upsert_index(&db, &make_index(id, "main")).await.unwrap();
        }
        let ids: Vec<_> = list_indexes_page(&db, None, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|(_, i)| i.id)
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }
}
