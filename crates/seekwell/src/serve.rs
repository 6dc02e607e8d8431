// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `seekwell serve` command implementation.
//!
//! Opens the config store, builds the registries, and serves the admin
//! gateway until Ctrl-C.

use std::sync::Arc;

use seekwell_backend::BackendCatalog;
use seekwell_config::model::SeekwellConfig;
use seekwell_core::{
    Actor, ConfigStore, PluginAdapter, SeekwellError, ADMINISTER_SEARCH_CONFIGURATION,
};
use seekwell_gateway::{AdminGateway, TokenAuthenticator};
use seekwell_registry::{AdminSurface, EntityLocks, IndexRegistry, ServerRegistry};
use seekwell_storage::SqliteConfigStore;
use tracing::{info, warn};

/// Store and registries wired together.
pub struct Stack {
    pub store: Arc<dyn ConfigStore>,
    pub servers: Arc<ServerRegistry>,
    pub admin: AdminSurface,
}

/// Open the store and build the registries over it.
pub async fn open_stack(config: &SeekwellConfig) -> Result<Stack, SeekwellError> {
    let store: Arc<dyn ConfigStore> =
        Arc::new(SqliteConfigStore::open(config.storage.clone()).await?);
    let catalog = BackendCatalog::from_config(&config.backends)?;
    info!(backends = ?catalog.types(), "backend clients registered");

    let locks = EntityLocks::new();
    let servers = Arc::new(ServerRegistry::new(store.clone(), catalog, locks.clone()));
    let indexes = Arc::new(IndexRegistry::new(store.clone(), servers.clone(), locks));
    let admin = AdminSurface::new(servers.clone(), indexes);

    Ok(Stack {
        store,
        servers,
        admin,
    })
}

/// The actor for local CLI commands. Whoever can open the database file
/// already holds every capability over it.
pub fn local_operator() -> Actor {
    Actor::new("cli", [ADMINISTER_SEARCH_CONFIGURATION])
}

/// Run the `seekwell serve` command.
pub async fn run_serve(config: SeekwellConfig) -> Result<(), SeekwellError> {
    info!(service = %config.service.name, "starting");
    let stack = open_stack(&config).await?;

    if !config.gateway.enabled {
        warn!("gateway is disabled; nothing to serve");
        return stack.store.close().await;
    }

    let auth = TokenAuthenticator::new(&config.access);
    if let Ok(status) = auth.health_check().await {
        info!(?status, "token authenticator ready");
    }
    if auth.is_empty() {
        warn!("no access tokens configured; every admin request will be rejected");
    }

    let gateway = AdminGateway::new(config.gateway.clone(), stack.admin.clone(), Arc::new(auth))
        .with_service_name(config.service.name.clone());
    gateway.start().await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| SeekwellError::Internal(format!("failed to listen for Ctrl-C: {e}")))?;
    info!("shutdown signal received");

    let gateway_result = gateway.shutdown().await;
    stack.store.close().await?;
    gateway_result?;

    info!("shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("seekwell={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
