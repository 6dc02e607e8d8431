// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete registry stack.
//!
//! Each test creates an isolated TestHarness with temp SQLite and mock
//! backends. Tests are independent and order-insensitive.

use seekwell_core::{BackendType, ConfigStore, EntityKind, EntityStatus, SeekwellError};
use seekwell_test_utils::{sample_index, TestHarness};

// ---- Scenario: server with one dependent index ----

#[tokio::test]
async fn test_overview_scenario_with_dependent_index() {
    let harness = TestHarness::builder().build().await.unwrap();
    let s1 = harness
        .create_server("s1", "S1", BackendType::Solr)
        .await
        .unwrap();
    harness.create_index("i1", "s1").await.unwrap();

    let overview = harness
        .admin
        .list_overview(&harness.admin_actor())
        .await
        .unwrap();
    assert_eq!(overview.server("s1").unwrap().dependent_count, 1);
    assert_eq!(overview.index("i1").unwrap().server_label, s1.label);

    let admin = harness.admin_actor();
    let err = harness.servers.delete_server(&admin, "s1").await.unwrap_err();
    assert!(matches!(err, SeekwellError::Conflict(_)));
    assert!(harness.servers.get_server("s1").await.is_ok());

    harness.indexes.delete_index(&admin, "i1").await.unwrap();
    harness.servers.delete_server(&admin, "s1").await.unwrap();

    let overview = harness.admin.list_overview(&admin).await.unwrap();
    assert!(overview.servers.is_empty());
    assert!(overview.indexes.is_empty());
}

// ---- Referential integrity ----

#[tokio::test]
async fn test_index_on_missing_server_leaves_registry_unchanged() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .create_server("s1", "S1", BackendType::Database)
        .await
        .unwrap();
    harness.create_index("i1", "s1").await.unwrap();
    let before = harness.indexes.list_indexes().await.unwrap();

    let err = harness.create_index("i2", "ghost").await.unwrap_err();
    assert!(matches!(
        err,
        SeekwellError::NotFound {
            kind: EntityKind::Server,
            ..
        }
    ));
    assert_eq!(harness.indexes.list_indexes().await.unwrap(), before);
}

#[tokio::test]
async fn test_server_and_index_ids_are_namespaced() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .create_server("content", "Content", BackendType::Database)
        .await
        .unwrap();
    harness.create_index("content", "content").await.unwrap();

    assert_eq!(harness.servers.get_server("content").await.unwrap().id, "content");
    assert_eq!(harness.indexes.get_index("content").await.unwrap().id, "content");
}

// ---- Query reachability ----

#[tokio::test]
async fn test_disabling_server_blocks_query_target_until_reenabled() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .create_server("s1", "S1", BackendType::Solr)
        .await
        .unwrap();
    harness.create_index("i1", "s1").await.unwrap();
    let admin = harness.admin_actor();

    let target = harness.indexes.query_target("i1").await.unwrap();
    assert_eq!(target.server.id, "s1");

    harness
        .servers
        .set_status(&admin, "s1", EntityStatus::Disabled)
        .await
        .unwrap();
    let err = harness.indexes.query_target("i1").await.unwrap_err();
    assert!(matches!(err, SeekwellError::BackendUnavailable { .. }));

    let overview = harness.admin.list_overview(&admin).await.unwrap();
    assert!(!overview.index("i1").unwrap().reachable);

    harness
        .servers
        .set_status(&admin, "s1", EntityStatus::Enabled)
        .await
        .unwrap();
    assert!(harness.indexes.query_target("i1").await.is_ok());
}

#[tokio::test]
async fn test_health_check_reports_unreachable_backend() {
    let harness = TestHarness::builder()
        .with_unreachable(BackendType::Elasticsearch)
        .build()
        .await
        .unwrap();
    harness
        .create_server("es", "ES", BackendType::Elasticsearch)
        .await
        .unwrap();
    harness
        .create_server("db", "DB", BackendType::Database)
        .await
        .unwrap();

    let es = harness.servers.check_health("es").await.unwrap();
    assert!(matches!(es.status, seekwell_core::HealthStatus::Unhealthy(_)));
    let db = harness.servers.check_health("db").await.unwrap();
    assert_eq!(db.status, seekwell_core::HealthStatus::Healthy);

    harness
        .mock(BackendType::Elasticsearch)
        .unwrap()
        .set_reachable(true);
    let es = harness.servers.check_health("es").await.unwrap();
    assert_eq!(es.status, seekwell_core::HealthStatus::Healthy);
}

// ---- Access ----

#[tokio::test]
async fn test_local_actions_only_for_administrators() {
    let harness = TestHarness::builder().build().await.unwrap();

    let admin_view = harness
        .admin
        .list_overview(&harness.admin_actor())
        .await
        .unwrap();
    let titles: Vec<_> = admin_view
        .local_actions
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Add server", "Add index"]);

    let viewer_view = harness
        .admin
        .list_overview(&harness.viewer_actor())
        .await
        .unwrap();
    assert!(viewer_view.local_actions.is_empty());
}

#[tokio::test]
async fn test_viewer_cannot_create_index() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .create_server("s1", "S1", BackendType::Solr)
        .await
        .unwrap();
    let err = harness
        .indexes
        .create_index(&harness.viewer_actor(), sample_index("i1", "s1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SeekwellError::Permission { .. }));
    assert!(harness.indexes.list_indexes().await.unwrap().is_empty());
}

// ---- Listing ----

#[tokio::test]
async fn test_store_cursor_pages_and_rewinds() {
    let harness = TestHarness::builder().build().await.unwrap();
    for n in 0..5 {
        harness
            .create_server(&format!("s{n}"), &format!("S{n}"), BackendType::Database)
            .await
            .unwrap();
    }

    let mut cursor = harness.store.list(EntityKind::Server).with_page_size(2);
    let mut first = Vec::new();
    while let Some(entity) = cursor.next().await.unwrap() {
        first.push(entity.id().to_string());
    }
    assert_eq!(first, vec!["s0", "s1", "s2", "s3", "s4"]);

    cursor.rewind();
    let again = cursor.next().await.unwrap().unwrap();
    assert_eq!(again.id(), "s0");
}

#[tokio::test]
async fn test_overview_redacts_credentials() {
    let harness = TestHarness::builder().build().await.unwrap();
    let mut server = seekwell_registry::NewServer::from(
        harness
            .create_server("s1", "S1", BackendType::Solr)
            .await
            .unwrap(),
    );
    server.id = "s2".to_string();
    server
        .backend_settings
        .insert("password".into(), serde_json::json!("hunter2"));
    harness
        .servers
        .create_server(&harness.admin_actor(), server)
        .await
        .unwrap();

    let overview = harness
        .admin
        .list_overview(&harness.admin_actor())
        .await
        .unwrap();
    let settings = &overview.server("s2").unwrap().backend_settings;
    assert_eq!(settings["password"], "[REDACTED]");

    // The store keeps the real value.
    let stored = harness.servers.get_server("s2").await.unwrap();
    assert_eq!(stored.backend_settings["password"], "hunter2");
}
