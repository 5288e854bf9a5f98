use crate::parse::{DEFAULT_LEVEL_MARKER, ParserOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Default, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ShoplogConfig {
    pub parser: ParserConfig,
    pub geoip: GeoipConfig,
    pub logging: LoggingConfig,
}

//-----------------------------------------------------------------------------
// Parser
//-----------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ParserConfig {
    /// Log level token that precedes the client id, e.g. `INFO`.
    pub level_marker: String,

    /// Threads used to derive per-client events.
    pub workers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            level_marker: DEFAULT_LEVEL_MARKER.to_string(),
            workers: 1,
        }
    }
}

impl From<&ParserConfig> for ParserOptions {
    fn from(cfg: &ParserConfig) -> Self {
        Self {
            level_marker: cfg.level_marker.clone(),
            workers: cfg.workers,
        }
    }
}

//-----------------------------------------------------------------------------
// GeoIP
//-----------------------------------------------------------------------------

#[derive(Default, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct GeoipConfig {
    pub enable: bool,

    /// MaxMind country database (`.mmdb`).
    pub country_db: Option<PathBuf>,
}

//-----------------------------------------------------------------------------
// Logging
//-----------------------------------------------------------------------------

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Picked from the terminal when unset.
    pub format: Option<LogFormat>,

    /// Default `EnvFilter` directive; `RUST_LOG` overrides it.
    pub level: String,

    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: None,
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}
