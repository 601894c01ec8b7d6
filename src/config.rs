//! Centralized configuration management for bpdesk

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Skip the selection list when a query yields exactly one record
    pub auto_choose_single: bool,
    /// Optional JSON file with localized message overrides
    pub i18n_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./bpdesk.db"),
            auto_choose_single: true,
            i18n_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let database_path = std::env::var("BPDESK_DB_PATH")
            .unwrap_or_else(|_| "./bpdesk.db".to_string())
            .into();

        let auto_choose_single = parse_env_var("BPDESK_AUTO_CHOOSE")?.unwrap_or(true);

        let i18n_path = std::env::var("BPDESK_I18N_PATH").ok().map(PathBuf::from);

        Ok(Config {
            database_path,
            auto_choose_single,
            i18n_path,
        })
    }

    /// Get database path as string
    pub fn database_path_str(&self) -> &str {
        self.database_path.to_str().unwrap_or("./bpdesk.db")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Database parent directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        if let Some(ref path) = self.i18n_path {
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "Localization override file does not exist: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
