//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. Data paths,
//! partition selection and entry-form defaults are externalized here -
//! nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

use crate::domain::wager::LedgerPartition;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the engine begins serving.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  pub app: AppSettings,
  /// Ledger storage configuration.
  pub ledger: LedgerConfig,
  /// Race-card catalog configuration.
  pub catalog: CatalogConfig,
  /// Desk behavior and entry-form defaults.
  pub desk: DeskConfig,
  /// HTTP server configuration.
  pub server: ServerConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
  /// Human-readable application name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Ledger storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
  /// Directory for JSONL ledger files.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

/// Race-card catalog configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
  /// Path to the JSON race-card file.
  pub race_card: String,
}

/// Desk behavior configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeskConfig {
  /// Partition active at startup.
  #[serde(default = "default_partition")]
  pub partition: LedgerPartition,
  /// Recent-bettor list size.
  #[serde(default = "default_recent_limit")]
  pub recent_limit: usize,
  /// Tax rate (percent) applied when entry leaves it unspecified.
  #[serde(default = "default_tax_rate")]
  pub default_tax_rate: f64,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind address for the HTTP surface.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_partition() -> LedgerPartition {
  LedgerPartition::Local
}

fn default_recent_limit() -> usize {
  7
}

fn default_tax_rate() -> f64 {
  5.0
}

fn default_bind_address() -> String {
  "0.0.0.0:8080".to_string()
}
