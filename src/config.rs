use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::notifier::DEFAULT_SUBJECT;

/// Overrides `database_path` when set
pub const DATABASE_ENV: &str = "FINANCIAL_REPORTING_DB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub statement_subject: String,
    pub sender: Option<String>,
    /// Used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("financial_reporting.db"),
            statement_subject: DEFAULT_SUBJECT.to_string(),
            sender: None,
            log_filter: "financial_reporting=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            serde_json::from_str(&content).context("Failed to parse config JSON")?
        } else {
            AppConfig::default()
        };

        if let Ok(db_path) = env::var(DATABASE_ENV) {
            if !db_path.is_empty() {
                config.database_path = PathBuf::from(db_path);
            }
        }

        Ok(config)
    }
}
