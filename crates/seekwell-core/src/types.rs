// SPDX-FileCopyrightText: 2026 Seekwell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration entities and common types shared across Seekwell crates.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::SeekwellError;

/// Capability required for every mutation of search configuration.
pub const ADMINISTER_SEARCH_CONFIGURATION: &str = "administer search configuration";

/// Maximum length of a machine name (entity ids, field names, processor ids).
pub const MACHINE_NAME_MAX_LEN: usize = 50;

/// Backend-specific settings, kept as opaque JSON values.
pub type Settings = BTreeMap<String, serde_json::Value>;

/// Health status reported by adapter health checks and backend pings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Operational but experiencing issues.
    Degraded(String),
    /// Not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Backend,
    Auth,
    Gateway,
}

/// The two kinds of persisted configuration entities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Server,
    Index,
}

/// Whether an entity is enabled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    Enabled,
    Disabled,
}

impl EntityStatus {
    pub fn is_enabled(self) -> bool {
        self == EntityStatus::Enabled
    }
}

/// Search engine implementations a server can connect to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Solr,
    Elasticsearch,
    Database,
}

impl BackendType {
    /// All known backend types.
    pub const ALL: [BackendType; 3] = [
        BackendType::Solr,
        BackendType::Elasticsearch,
        BackendType::Database,
    ];

    /// Parse a backend name, mapping unknown names to [`SeekwellError::InvalidBackend`].
    pub fn parse(name: &str) -> Result<Self, SeekwellError> {
        BackendType::from_str(name.trim()).map_err(|_| SeekwellError::InvalidBackend {
            backend: name.to_string(),
        })
    }
}

/// Data type of an indexed field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    String,
    Integer,
    Decimal,
    Date,
    Boolean,
}

/// A field in an index schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub data_type: FieldType,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, data_type: FieldType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A processor in an index pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorRef {
    pub id: String,
    #[serde(default)]
    pub settings: Settings,
}

impl ProcessorRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            settings: Settings::new(),
        }
    }
}

/// A configured connection to a search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub backend_type: BackendType,
    #[serde(default)]
    pub backend_settings: Settings,
    #[serde(default)]
    pub status: EntityStatus,
}

impl ServerConfig {
    /// Check required fields and machine-name rules.
    pub fn validate(&self) -> Result<(), SeekwellError> {
        validate_machine_name("server id", &self.id)?;
        validate_label("server", &self.id, &self.label)
    }
}

/// A logical collection of searchable content bound to one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub server_id: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub processors: Vec<ProcessorRef>,
    #[serde(default)]
    pub status: EntityStatus,
}

impl IndexConfig {
    /// Check required fields, machine names, and uniqueness of fields and processors.
    pub fn validate(&self) -> Result<(), SeekwellError> {
        validate_machine_name("index id", &self.id)?;
        validate_label("index", &self.id, &self.label)?;
        if self.server_id.trim().is_empty() {
            return Err(SeekwellError::Validation(format!(
                "index `{}` must reference a server",
                self.id
            )));
        }

        let mut names = BTreeSet::new();
        for field in &self.fields {
            validate_machine_name("field name", &field.name)?;
            if !names.insert(field.name.as_str()) {
                return Err(SeekwellError::Validation(format!(
                    "duplicate field `{}` in index `{}`",
                    field.name, self.id
                )));
            }
        }

        let mut processors = BTreeSet::new();
        for processor in &self.processors {
            validate_machine_name("processor id", &processor.id)?;
            if !processors.insert(processor.id.as_str()) {
                return Err(SeekwellError::Validation(format!(
                    "duplicate processor `{}` in index `{}`",
                    processor.id, self.id
                )));
            }
        }
        Ok(())
    }
}

/// A persisted configuration entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConfigEntity {
    Server(ServerConfig),
    Index(IndexConfig),
}

impl ConfigEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            ConfigEntity::Server(_) => EntityKind::Server,
            ConfigEntity::Index(_) => EntityKind::Index,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ConfigEntity::Server(s) => &s.id,
            ConfigEntity::Index(i) => &i.id,
        }
    }

    pub fn validate(&self) -> Result<(), SeekwellError> {
        match self {
            ConfigEntity::Server(s) => s.validate(),
            ConfigEntity::Index(i) => i.validate(),
        }
    }

    pub fn into_server(self) -> Result<ServerConfig, SeekwellError> {
        match self {
            ConfigEntity::Server(s) => Ok(s),
            other => Err(SeekwellError::Internal(format!(
                "expected server entity, found {} `{}`",
                other.kind(),
                other.id()
            ))),
        }
    }

    pub fn into_index(self) -> Result<IndexConfig, SeekwellError> {
        match self {
            ConfigEntity::Index(i) => Ok(i),
            other => Err(SeekwellError::Internal(format!(
                "expected index entity, found {} `{}`",
                other.kind(),
                other.id()
            ))),
        }
    }
}

impl From<ServerConfig> for ConfigEntity {
    fn from(server: ServerConfig) -> Self {
        ConfigEntity::Server(server)
    }
}

impl From<IndexConfig> for ConfigEntity {
    fn from(index: IndexConfig) -> Self {
        ConfigEntity::Index(index)
    }
}

/// An authenticated caller with a set of opaque capability strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub capabilities: BTreeSet<String>,
}

impl Actor {
    pub fn new<I, S>(id: impl Into<String>, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// An actor with no capabilities.
    pub fn anonymous() -> Self {
        Self::new("anonymous", Vec::<String>::new())
    }

    pub fn has(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// Validate a machine name: `[a-z0-9_]`, non-empty, at most 50 characters.
pub fn validate_machine_name(what: &str, name: &str) -> Result<(), SeekwellError> {
    if name.is_empty() {
        return Err(SeekwellError::Validation(format!("{what} must not be empty")));
    }
    if name.len() > MACHINE_NAME_MAX_LEN {
        return Err(SeekwellError::Validation(format!(
            "{what} `{name}` exceeds {MACHINE_NAME_MAX_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(SeekwellError::Validation(format!(
            "{what} `{name}` may only contain lowercase letters, digits and underscores"
        )));
    }
    Ok(())
}

fn validate_label(what: &str, id: &str, label: &str) -> Result<(), SeekwellError> {
    if label.trim().is_empty() {
        return Err(SeekwellError::Validation(format!(
            "{what} `{id}` must have a label"
        )));
    }
    Ok(())
}
