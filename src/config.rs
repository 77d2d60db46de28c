//! Application configuration from the environment.
//!
//! `.env` is loaded by the binary with dotenvy before `AppConfig::from_env`
//! runs. The price table defaults to the built-in one unless
//! `PRICING_TABLE_PATH` points at a JSON file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::pricing::{PriceTable, PricingError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_COMPANY_NAME: &str = "JRC Consulting Group";

/// Configuration loading error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    #[error("cannot read price table {path}: {source}")]
    PriceTableIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse price table {path}: {source}")]
    PriceTableParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    PriceTable(#[from] PricingError),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub pricing_table_path: Option<PathBuf>,
    /// Shown in the document header
    pub company_name: String,
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.parse::<u32>().map_err(|e| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                message: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            pricing_table_path: get("PRICING_TABLE_PATH").map(PathBuf::from),
            company_name: get("COMPANY_NAME").unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
        })
    }

    /// Load and validate the price table
    pub fn price_table(&self) -> Result<PriceTable, ConfigError> {
        let table = match &self.pricing_table_path {
            Some(path) => load_price_table(path)?,
            None => {
                info!("Using built-in price table");
                PriceTable::default()
            }
        };
        table.validate()?;
        Ok(table)
    }
}

/// Read a price table from a JSON file
pub fn load_price_table(path: &Path) -> Result<PriceTable, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PriceTableIo {
        path: path.to_path_buf(),
        source,
    })?;
    let table: PriceTable =
        serde_json::from_str(&raw).map_err(|source| ConfigError::PriceTableParse {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Loaded price table with {} plans from {}", table.plans.len(), path.display());
    Ok(table)
}
