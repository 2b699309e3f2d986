use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    endpoint::USGS_EVENT_QUERY,
    model::{
        DEFAULT_FORMAT, DEFAULT_LIMIT, DEFAULT_MIN_MAGNITUDE, DEFAULT_ORDER_BY, DisplayZone,
        QuakeQuery,
    },
    pipeline::FetchPipeline,
};

/// Sort orders understood by the event service.
pub const ORDER_BY_CHOICES: &[&str] = &["time", "time-asc", "magnitude", "magnitude-asc"];

/// User settings stored on disk.
///
/// Example TOML:
/// ```toml
/// min_magnitude = "4.5"
/// limit = "50"
/// order_by = "magnitude"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event query endpoint, normally the USGS one.
    pub endpoint: String,
    pub min_magnitude: String,
    pub limit: String,
    pub order_by: String,
    /// Render dates in UTC instead of the host zone.
    pub use_utc: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: USGS_EVENT_QUERY.to_string(),
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            limit: DEFAULT_LIMIT.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
            use_utc: false,
        }
    }
}

impl Config {
    /// Snapshot of the query parameters for one run.
    pub fn query(&self) -> QuakeQuery {
        QuakeQuery {
            format: DEFAULT_FORMAT.to_string(),
            order_by: self.order_by.clone(),
            min_magnitude: self.min_magnitude.clone(),
            limit: self.limit.clone(),
        }
    }

    pub fn display_zone(&self) -> DisplayZone {
        if self.use_utc { DisplayZone::utc() } else { DisplayZone::Local }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "quake-report", "quake-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Construct an HTTP-backed pipeline from the configured endpoint and zone.
pub fn pipeline_from_config(config: &Config) -> Result<FetchPipeline> {
    FetchPipeline::http(config.endpoint.clone(), config.display_zone())
        .context("Failed to set up the earthquake feed client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_usgs_settings() {
        let cfg = Config::default();
        let query = cfg.query();

        assert_eq!(cfg.endpoint, "https://earthquake.usgs.gov/fdsnws/event/1/query");
        assert_eq!(query.format, "geojson");
        assert_eq!(query.min_magnitude, "6.0");
        assert_eq!(query.limit, "20");
        assert_eq!(query.order_by, "time");
        assert_eq!(cfg.display_zone(), DisplayZone::Local);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("limit = \"5\"\nuse_utc = true\n").unwrap();

        assert_eq!(cfg.limit, "5");
        assert_eq!(cfg.min_magnitude, "6.0");
        assert_eq!(cfg.order_by, "time");
        assert_eq!(cfg.display_zone(), DisplayZone::utc());
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            min_magnitude: "4.5".into(),
            order_by: "magnitude".into(),
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "limit = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn pipeline_uses_configured_endpoint() {
        let cfg = Config { endpoint: "http://localhost:9/query".into(), ..Config::default() };
        let pipeline = pipeline_from_config(&cfg).unwrap();
        assert_eq!(pipeline.endpoint(), "http://localhost:9/query");
    }
}
