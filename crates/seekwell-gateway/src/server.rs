// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use seekwell_core::{AuthAdapter, SeekwellError};
use seekwell_registry::admin::{ADD_INDEX_PATH, ADD_SERVER_PATH, ADMIN_BASE_PATH};
use seekwell_registry::AdminSurface;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    pub service_name: String,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub admin: AdminSurface,
    pub health: HealthState,
}

/// Build the full router: public `/health` plus the authenticated admin API.
pub fn build_router(state: GatewayState, auth: Arc<dyn AuthAdapter>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .with_state(state.clone());

    let server = format!("{ADMIN_BASE_PATH}/server/{{id}}");
    let index = format!("{ADMIN_BASE_PATH}/index/{{id}}");

    let api_routes = Router::new()
        .route(ADMIN_BASE_PATH, get(handlers::get_overview))
        .route(ADD_SERVER_PATH, post(handlers::post_add_server))
        .route(ADD_INDEX_PATH, post(handlers::post_add_index))
        .route(
            &server,
            get(handlers::get_server)
                .patch(handlers::patch_server)
                .delete(handlers::delete_server),
        )
        .route(&format!("{server}/enable"), post(handlers::enable_server))
        .route(&format!("{server}/disable"), post(handlers::disable_server))
        .route(&format!("{server}/health"), get(handlers::get_server_health))
        .route(
            &index,
            get(handlers::get_index).delete(handlers::delete_index),
        )
        .route(&format!("{index}/enable"), post(handlers::enable_index))
        .route(&format!("{index}/disable"), post(handlers::disable_index))
        .route(&format!("{index}/fields"), post(handlers::post_field))
        .route(
            &format!("{index}/fields/{{name}}"),
            delete(handlers::delete_field),
        )
        .route(
            &format!("{index}/processors"),
            post(handlers::post_processor).put(handlers::put_processors),
        )
        .route(
            &format!("{index}/processors/{{pid}}"),
            delete(handlers::delete_processor),
        )
        .route(
            &format!("{index}/query-target"),
            get(handlers::get_query_target),
        )
        .route_layer(axum_middleware::from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind the gateway listener on `host:port`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, SeekwellError> {
    let addr = format!("{host}:{port}");
    TcpListener::bind(&addr)
        .await
        .map_err(|e| SeekwellError::Internal(format!("failed to bind gateway to {addr}: {e}")))
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn start_server(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), SeekwellError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("admin gateway listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SeekwellError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
