// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Seekwell configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SeekwellConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Config store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP admin gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Bearer tokens and the capabilities they grant.
    #[serde(default)]
    pub access: AccessConfig,

    /// Search backend client settings.
    #[serde(default)]
    pub backends: BackendsConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name used in logs and the health endpoint.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "seekwell".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Config store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file (`:memory:` for an in-memory store).
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("seekwell").join("seekwell.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("seekwell.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP admin gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Serve the admin API from `seekwell serve`.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    7710
}

/// Access configuration: static bearer tokens mapped to capability sets.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Tokens accepted by the admin gateway.
    #[serde(default)]
    pub tokens: Vec<AccessTokenConfig>,
}

/// A single bearer token and the actor it authenticates as.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccessTokenConfig {
    /// Actor name reported in logs.
    pub name: String,

    /// The bearer token value.
    pub token: String,

    /// Capabilities granted to the actor.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl std::fmt::Debug for AccessTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenConfig")
            .field("name", &self.name)
            .field("token", &"[redacted]")
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Search backend client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendsConfig {
    /// Backend types with a registered client. Servers of other types are rejected.
    #[serde(default = "default_enabled_backends")]
    pub enabled: Vec<String>,

    /// Timeout for a single connectivity ping, in seconds.
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,

    /// Require HTTPS for backend endpoints that are not on localhost.
    #[serde(default = "default_require_tls")]
    pub require_tls: bool,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_backends(),
            ping_timeout_secs: default_ping_timeout_secs(),
            require_tls: default_require_tls(),
        }
    }
}

fn default_enabled_backends() -> Vec<String> {
    vec![
        "solr".to_string(),
        "elasticsearch".to_string(),
        "database".to_string(),
    ]
}

fn default_ping_timeout_secs() -> u64 {
    5
}

fn default_require_tls() -> bool {
    false
}
