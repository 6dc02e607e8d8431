// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP admin API for search configuration.
//!
//! The gateway exposes the [`AdminSurface`] over axum: the overview page,
//! the "Add server" and "Add index" local actions, and per-entity routes.
//! Requests authenticate with a bearer token; capability checks stay in
//! the registries.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{oneshot, Mutex};

use seekwell_config::model::GatewayConfig;
use seekwell_core::{AdapterType, AuthAdapter, HealthStatus, PluginAdapter, SeekwellError};
use seekwell_registry::AdminSurface;

pub use auth::TokenAuthenticator;
pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, GatewayState, HealthState};

struct Running {
    handle: tokio::task::JoinHandle<Result<(), SeekwellError>>,
    stop: oneshot::Sender<()>,
    addr: SocketAddr,
}

/// The admin API as a managed adapter: started once, stopped on shutdown.
pub struct AdminGateway {
    config: GatewayConfig,
    admin: AdminSurface,
    auth: Arc<dyn AuthAdapter>,
    service_name: String,
    running: Mutex<Option<Running>>,
}

impl AdminGateway {
    pub fn new(config: GatewayConfig, admin: AdminSurface, auth: Arc<dyn AuthAdapter>) -> Self {
        Self {
            config,
            admin,
            auth,
            service_name: "seekwell".to_string(),
            running: Mutex::new(None),
        }
    }

    /// Name reported by `GET /health`.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Router over this gateway's state, without binding a socket.
    pub fn router(&self) -> axum::Router {
        let state = GatewayState {
            admin: self.admin.clone(),
            health: HealthState {
                start_time: std::time::Instant::now(),
                service_name: self.service_name.clone(),
            },
        };
        build_router(state, self.auth.clone())
    }

    /// Bind the listener and spawn the HTTP server as a background task.
    ///
    /// Bind failures are returned here rather than from the task.
    pub async fn start(&self) -> Result<(), SeekwellError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(SeekwellError::Internal(
                "admin gateway already started".to_string(),
            ));
        }

        let listener = server::bind(&self.config.host, self.config.port).await?;
        let addr = listener
            .local_addr()
            .map_err(|e| SeekwellError::Internal(format!("gateway listener has no address: {e}")))?;

        let app = self.router();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = stopped.await;
            };
            let result = server::start_server(listener, app, shutdown).await;
            if let Err(e) = &result {
                tracing::error!("admin gateway error: {e}");
            }
            result
        });

        *running = Some(Running { handle, stop, addr });
        tracing::info!("admin gateway started on {addr}");
        Ok(())
    }

    /// Address the gateway is bound to, once started.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        self.running.lock().await.as_ref().map(|r| r.addr)
    }
}

#[async_trait]
impl PluginAdapter for AdminGateway {
    fn name(&self) -> &str {
        "gateway"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Gateway
    }

    async fn health_check(&self) -> Result<HealthStatus, SeekwellError> {
        let running = self.running.lock().await;
        match running.as_ref() {
            Some(r) if !r.handle.is_finished() => Ok(HealthStatus::Healthy),
            Some(_) => Ok(HealthStatus::Unhealthy("server exited".to_string())),
            None => Ok(HealthStatus::Unhealthy("server not started".to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), SeekwellError> {
        let mut running = self.running.lock().await;
        if let Some(Running { handle, stop, .. }) = running.take() {
            let _ = stop.send(());
            match handle.await {
                Ok(result) => return result,
                Err(e) if !e.is_cancelled() => {
                    return Err(SeekwellError::Internal(format!(
                        "admin gateway task failed: {e}"
                    )));
                }
                Err(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seekwell_config::model::AccessConfig;
    use seekwell_test_utils::TestHarness;

    fn gateway(harness: &TestHarness) -> AdminGateway {
        let config = GatewayConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        AdminGateway::new(
            config,
            harness.admin.clone(),
            Arc::new(TokenAuthenticator::new(&AccessConfig::default())),
        )
    }

    #[tokio::test]
    async fn health_tracks_lifecycle() {
        let harness = TestHarness::builder().build().await.unwrap();
        let gateway = gateway(&harness);
        assert!(matches!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));

        gateway.start().await.unwrap();
        assert!(gateway.start().await.is_err());
        assert_eq!(gateway.health_check().await.unwrap(), HealthStatus::Healthy);
        assert_ne!(gateway.local_addr().await.unwrap().port(), 0);

        gateway.shutdown().await.unwrap();
        assert!(matches!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn start_fails_when_port_is_taken() {
        let harness = TestHarness::builder().build().await.unwrap();
        let held = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = held.local_addr().unwrap().port();

        let mut gateway = gateway(&harness);
        gateway.config.port = port;

        let err = gateway.start().await.unwrap_err();
        assert!(err.to_string().contains("failed to bind"), "{err}");
        assert!(gateway.local_addr().await.is_none());
        assert_eq!(
            gateway.health_check().await.unwrap(),
            HealthStatus::Unhealthy("server not started".to_string())
        );
        gateway.shutdown().await.unwrap();
        drop(held);
    }
}
