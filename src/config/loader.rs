//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    name = %config.app.name,
    partition = %config.desk.partition,
    recent_limit = config.desk.recent_limit,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.app.name.trim().is_empty(),
    "app.name must not be empty"
  );
  anyhow::ensure!(
    !config.ledger.data_dir.trim().is_empty(),
    "ledger.data_dir must not be empty"
  );
  anyhow::ensure!(
    !config.catalog.race_card.trim().is_empty(),
    "catalog.race_card must not be empty"
  );
  anyhow::ensure!(
    config.desk.recent_limit > 0,
    "desk.recent_limit must be positive"
  );
  anyhow::ensure!(
    config.desk.default_tax_rate >= 0.0,
    "desk.default_tax_rate must not be negative"
  );
  anyhow::ensure!(
    config.server.bind_address.parse::<std::net::SocketAddr>().is_ok(),
    "server.bind_address is not a valid socket address: {}",
    config.server.bind_address
  );
  Ok(())
}
