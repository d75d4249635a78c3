use std::path::Path;

use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::domain::order::Audience;

pub const DEFAULT_LOG_FILTER: &str = "info,seafood_orders=debug";

// ============================================================================
// Configuration
// ============================================================================
//
// Precedence (lowest to highest):
// 1. Defaults
// 2. seafood-orders.toml in the working directory, if present
// 3. SEAFOOD_ORDERS_* environment variables (e.g. SEAFOOD_ORDERS_AUDIENCE=admin)
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Which step descriptions to render
    pub audience: Audience,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audience: Audience::Portal,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("audience", "portal")?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?)
    }

    pub fn load() -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::with_name("seafood-orders").required(false))
            .add_source(Environment::with_prefix("SEAFOOD_ORDERS"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}
