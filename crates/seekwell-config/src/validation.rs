// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as known backend names, non-empty paths, and unique tokens.

use std::collections::HashSet;

use seekwell_core::BackendType;

use crate::diagnostic::ConfigError;
use crate::model::SeekwellConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SeekwellConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` must be one of {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    for name in &config.backends.enabled {
        if BackendType::parse(name).is_err() {
            let known: Vec<String> = BackendType::ALL.iter().map(|b| b.to_string()).collect();
            errors.push(ConfigError::Validation {
                message: format!(
                    "backends.enabled contains unknown backend `{name}` (known: {})",
                    known.join(", ")
                ),
            });
        }
    }

    if config.backends.ping_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "backends.ping_timeout_secs must be at least 1".to_string(),
        });
    }

    let mut seen_tokens = HashSet::new();
    let mut seen_names = HashSet::new();
    for (i, token) in config.access.tokens.iter().enumerate() {
        if token.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("access.tokens[{i}].name must not be empty"),
            });
        } else if !seen_names.insert(token.name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate access token name `{}`", token.name),
            });
        }

        if token.token.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("access.tokens[{i}].token must not be empty"),
            });
        } else if !seen_tokens.insert(token.token.as_str()) {
            // The value itself is never echoed back.
            errors.push(ConfigError::Validation {
                message: format!("access.tokens[{i}] reuses a token value of an earlier entry"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
