//! Adapter configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! version_order = "creation"
//! migration_table = "phinxlog"
//! database = "ANALYTICS"
//! schema = "PUBLIC"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordering policy for the version log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrder {
    /// By version id, which is the migration's creation time
    Creation,
    /// By the time each migration started executing, then by version
    Execution,
}

impl VersionOrder {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Execution => "execution",
        }
    }
}

impl std::str::FromStr for VersionOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("creation") {
            Ok(Self::Creation)
        } else if s.eq_ignore_ascii_case("execution") {
            Ok(Self::Execution)
        } else {
            Err(ConfigError::InvalidVersionOrder(s.to_string()))
        }
    }
}

impl std::fmt::Display for VersionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snowflake adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterConfig {
    /// How `get_version_log` orders its rows. Required by that call only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_order: Option<VersionOrder>,
    /// Name of the migration history table
    pub migration_table: String,
    /// Database the adapter is connected to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Schema the adapter is connected to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// On-disk shape. The ordering policy is validated after parsing so that an
/// unknown value reports [`ConfigError::InvalidVersionOrder`].
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    version_order: Option<String>,
    #[serde(default = "default_migration_table")]
    migration_table: String,
    #[serde(default)]
    database: Option<String>,
    #[serde(default)]
    schema: Option<String>,
}

fn default_migration_table() -> String {
    "phinxlog".to_string()
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            version_order: None,
            migration_table: default_migration_table(),
            database: None,
            schema: None,
        }
    }
}

impl TryFrom<RawConfig> for AdapterConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let version_order = raw
            .version_order
            .as_deref()
            .map(str::parse::<VersionOrder>)
            .transpose()?;
        Ok(Self {
            version_order,
            migration_table: raw.migration_table,
            database: raw.database,
            schema: raw.schema,
        })
    }
}

impl AdapterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        raw.try_into()
    }

    #[must_use]
    pub fn with_version_order(mut self, order: VersionOrder) -> Self {
        self.version_order = Some(order);
        self
    }

    #[must_use]
    pub fn with_migration_table(mut self, table: impl Into<String>) -> Self {
        self.migration_table = table.into();
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// The configured ordering policy, or an error when none is set
    pub fn require_version_order(&self) -> Result<VersionOrder, ConfigError> {
        self.version_order.ok_or(ConfigError::MissingVersionOrder)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("invalid version_order '{0}', expected \"creation\" or \"execution\"")]
    InvalidVersionOrder(String),
    #[error("version_order is not configured")]
    MissingVersionOrder,
}
