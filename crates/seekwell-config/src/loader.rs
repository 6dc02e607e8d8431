// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./seekwell.toml` > `~/.config/seekwell/seekwell.toml` >
//! `/etc/seekwell/seekwell.toml` with environment variable overrides via `SEEKWELL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SeekwellConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/seekwell/seekwell.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "seekwell.toml";

/// Path of the per-user config file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("seekwell/seekwell.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/seekwell/seekwell.toml`
/// 3. `~/.config/seekwell/seekwell.toml`
/// 4. `./seekwell.toml`
/// 5. `SEEKWELL_*` environment variables
pub fn load_config() -> Result<SeekwellConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SeekwellConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SeekwellConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SeekwellConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SeekwellConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SeekwellConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
///
/// Only the section prefix is split off, so `SEEKWELL_STORAGE_DATABASE_PATH`
/// becomes `storage.database_path`, not `storage.database.path`.
pub fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 4] = ["service", "storage", "gateway", "backends"];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

fn env_provider() -> Env {
    Env::prefixed("SEEKWELL_").map(|key| map_env_key(key.as_str()).into())
}
