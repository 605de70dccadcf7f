// ⚙️ Configuration - JSON file + environment overrides
//
// Precedence (highest first):
//   1. PLATE_TABLE_PATH / PLATE_SERVER_ADDR / PLATE_USE_FALLBACK
//   2. config file (--config <PATH>)
//   3. defaults

use crate::badge::BadgePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_TABLE_PATH: &str = "PLATE_TABLE_PATH";
pub const ENV_SERVER_ADDR: &str = "PLATE_SERVER_ADDR";
pub const ENV_USE_FALLBACK: &str = "PLATE_USE_FALLBACK";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reference table file (.json or .csv). None = built-in data set
    pub table_path: Option<PathBuf>,

    /// Fall back to the built-in data set when the table file fails to load
    pub use_fallback: bool,

    /// Listen address for the HTTP server
    pub server_addr: String,

    pub badge_policy: BadgePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            table_path: None,
            use_fallback: true,
            server_addr: "0.0.0.0:3000".to_string(),
            badge_policy: BadgePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// File (if given) + environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_TABLE_PATH).filter(|v| !v.is_empty()) {
            self.table_path = Some(PathBuf::from(path));
        }

        if let Some(addr) = lookup(ENV_SERVER_ADDR).filter(|v| !v.is_empty()) {
            self.server_addr = addr;
        }

        if let Some(flag) = lookup(ENV_USE_FALLBACK) {
            self.use_fallback = parse_bool(&flag)
                .with_context(|| format!("Invalid {}: {:?}", ENV_USE_FALLBACK, flag))?;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got {:?}", other)),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.table_path, None);
        assert!(config.use_fallback);
        assert_eq!(config.server_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"table_path": "data/matriculas.json", "badge_policy": {{"diesel_c_from": 2015}}}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.table_path, Some(PathBuf::from("data/matriculas.json")));
        assert_eq!(config.badge_policy.diesel_c_from, 2015);
        assert_eq!(config.badge_policy.gasoline_c_from, 2006);
        assert!(config.use_fallback);
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/config.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_TABLE_PATH, "/srv/table.csv"),
            (ENV_SERVER_ADDR, "127.0.0.1:8080"),
            (ENV_USE_FALLBACK, "no"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.table_path, Some(PathBuf::from("/srv/table.csv")));
        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert!(!config.use_fallback);
    }

    #[test]
    fn test_invalid_bool_override() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|k| {
            (k == ENV_USE_FALLBACK).then(|| "maybe".to_string())
        });
        assert!(result.is_err());
    }
}
