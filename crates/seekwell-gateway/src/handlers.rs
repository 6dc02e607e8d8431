// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the admin API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use seekwell_core::{
    Actor, EntityStatus, FieldDefinition, IndexConfig, ProcessorRef, ServerConfig,
};
use seekwell_registry::{NewServer, Overview, QueryTarget, ServerHealth, ServerUpdate};
use seekwell_security::{redact_settings, require_admin};

use crate::error::ApiError;
use crate::server::GatewayState;

type ApiResult<T> = Result<T, ApiError>;

/// Request body for adding a field.
#[derive(Debug, Deserialize)]
pub struct AddFieldRequest {
    #[serde(flatten)]
    pub field: FieldDefinition,
    /// Insert position; the field is appended when absent.
    #[serde(default)]
    pub position: Option<usize>,
}

/// Request body for adding a processor.
#[derive(Debug, Deserialize)]
pub struct AddProcessorRequest {
    #[serde(flatten)]
    pub processor: ProcessorRef,
    #[serde(default)]
    pub position: Option<usize>,
}

/// Request body for reordering processors.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Unwrap a mutation body once `actor` is known to hold the admin capability.
fn body<T>(actor: &Actor, payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    require_admin(actor)?;
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

/// Servers leave the API with credentials redacted.
fn redacted(mut server: ServerConfig) -> ServerConfig {
    server.backend_settings = redact_settings(&server.backend_settings);
    server
}

/// GET /health (unauthenticated)
pub async fn get_public_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.health.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /admin/config/search/search-api
pub async fn get_overview(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Overview>> {
    Ok(Json(state.admin.list_overview(&actor).await?))
}

/// POST /admin/config/search/search-api/add-server
pub async fn post_add_server(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<NewServer>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ServerConfig>)> {
    let request = body(&actor, payload)?;
    let server = state.admin.servers().create_server(&actor, request).await?;
    Ok((StatusCode::CREATED, Json(redacted(server))))
}

/// POST /admin/config/search/search-api/add-index
pub async fn post_add_index(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<IndexConfig>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<IndexConfig>)> {
    let index = body(&actor, payload)?;
    let index = state.admin.indexes().create_index(&actor, index).await?;
    Ok((StatusCode::CREATED, Json(index)))
}

/// GET …/server/{id}
pub async fn get_server(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ServerConfig>> {
    let server = state.admin.servers().get_server(&id).await?;
    Ok(Json(redacted(server)))
}

/// PATCH …/server/{id}
pub async fn patch_server(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<ServerUpdate>, JsonRejection>,
) -> ApiResult<Json<ServerConfig>> {
    let update = body(&actor, payload)?;
    let server = state.admin.servers().update_server(&actor, &id, update).await?;
    Ok(Json(redacted(server)))
}

/// DELETE …/server/{id}
pub async fn delete_server(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.admin.servers().delete_server(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST …/server/{id}/enable
pub async fn enable_server(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Json<ServerConfig>> {
    let server = state
        .admin
        .servers()
        .set_status(&actor, &id, EntityStatus::Enabled)
        .await?;
    Ok(Json(redacted(server)))
}

/// POST …/server/{id}/disable
pub async fn disable_server(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Json<ServerConfig>> {
    let server = state
        .admin
        .servers()
        .set_status(&actor, &id, EntityStatus::Disabled)
        .await?;
    Ok(Json(redacted(server)))
}

/// GET …/server/{id}/health
pub async fn get_server_health(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ServerHealth>> {
    Ok(Json(state.admin.servers().check_health(&id).await?))
}

/// GET …/index/{id}
pub async fn get_index(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<IndexConfig>> {
    Ok(Json(state.admin.indexes().get_index(&id).await?))
}

/// DELETE …/index/{id}
pub async fn delete_index(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.admin.indexes().delete_index(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST …/index/{id}/enable
pub async fn enable_index(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Json<IndexConfig>> {
    let index = state
        .admin
        .indexes()
        .set_status(&actor, &id, EntityStatus::Enabled)
        .await?;
    Ok(Json(index))
}

/// POST …/index/{id}/disable
pub async fn disable_index(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> ApiResult<Json<IndexConfig>> {
    let index = state
        .admin
        .indexes()
        .set_status(&actor, &id, EntityStatus::Disabled)
        .await?;
    Ok(Json(index))
}

/// POST …/index/{id}/fields
pub async fn post_field(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<AddFieldRequest>, JsonRejection>,
) -> ApiResult<Json<IndexConfig>> {
    let request = body(&actor, payload)?;
    let index = state
        .admin
        .indexes()
        .add_field(&actor, &id, request.field, request.position)
        .await?;
    Ok(Json(index))
}

/// DELETE …/index/{id}/fields/{name}
pub async fn delete_field(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path((id, name)): Path<(String, String)>,
) -> ApiResult<Json<IndexConfig>> {
    let index = state.admin.indexes().remove_field(&actor, &id, &name).await?;
    Ok(Json(index))
}

/// POST …/index/{id}/processors
pub async fn post_processor(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<AddProcessorRequest>, JsonRejection>,
) -> ApiResult<Json<IndexConfig>> {
    let request = body(&actor, payload)?;
    let index = state
        .admin
        .indexes()
        .add_processor(&actor, &id, request.processor, request.position)
        .await?;
    Ok(Json(index))
}

/// PUT …/index/{id}/processors
pub async fn put_processors(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<Json<IndexConfig>> {
    let request = body(&actor, payload)?;
    let index = state
        .admin
        .indexes()
        .reorder_processors(&actor, &id, request.order)
        .await?;
    Ok(Json(index))
}

/// DELETE …/index/{id}/processors/{pid}
pub async fn delete_processor(
    State(state): State<GatewayState>,
    Extension(actor): Extension<Actor>,
    Path((id, pid)): Path<(String, String)>,
) -> ApiResult<Json<IndexConfig>> {
    let index = state
        .admin
        .indexes()
        .remove_processor(&actor, &id, &pid)
        .await?;
    Ok(Json(index))
}

/// GET …/index/{id}/query-target
pub async fn get_query_target(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<QueryTarget>> {
    let mut target = state.admin.indexes().query_target(&id).await?;
    target.server = redacted(target.server);
    Ok(Json(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_field_request_flattens_definition() {
        let req: AddFieldRequest =
            serde_json::from_str(r#"{"name": "body", "data_type": "text", "position": 0}"#)
                .unwrap();
        assert_eq!(req.field.name, "body");
        assert_eq!(req.position, Some(0));

        let req: AddFieldRequest =
            serde_json::from_str(r#"{"name": "body", "data_type": "text"}"#).unwrap();
        assert_eq!(req.position, None);
    }

    #[test]
    fn add_processor_request_keeps_settings() {
        let req: AddProcessorRequest = serde_json::from_str(
            r#"{"id": "stemmer", "settings": {"language": "en"}, "position": 1}"#,
        )
        .unwrap();
        assert_eq!(req.processor.id, "stemmer");
        assert_eq!(req.processor.settings["language"], "en");
        assert_eq!(req.position, Some(1));
    }
}
