//! # Configuration Loading
//!
//! TOML configuration for the regime runner. Every section has defaults, so
//! an empty file is a valid configuration.

use quantlaxmi_qregime::{QuantumRegimeConfig, WindowConfig};
use serde::{Deserialize, Serialize};

/// CSV column names for the close panel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    pub date: String,
    pub spx: String,
    pub ndx: String,
    pub vix: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            spx: "SPX".to_string(),
            ndx: "NDX".to_string(),
            vix: "VIX".to_string(),
        }
    }
}

/// Root configuration schema for the regime runner.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub engine: QuantumRegimeConfig,
    pub windows: WindowConfig,
    pub columns: ColumnConfig,
}

impl RunnerConfig {
    /// Load configuration from file path
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|_| anyhow::anyhow!("Could not find config file: {}", path))?;

        let config: Self = toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path, e))?;
        Ok(config)
    }

    /// Engine and window settings must both validate.
    pub fn validate(&self) -> quantlaxmi_qregime::Result<()> {
        self.engine.validate()?;
        self.windows.validate()
    }

    /// Load from `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantlaxmi_qregime::ReadoutTable;

    #[test]
    fn test_empty_config_is_default() {
        let cfg: RunnerConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, RunnerConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let cfg: RunnerConfig = toml::from_str(
            r#"
            [engine]
            steepness = 3.0

            [engine.thresholds]
            shock = 0.4

            [windows]
            liquidity = 5

            [columns]
            spx = "^GSPC"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.engine.steepness, 3.0);
        assert_eq!(cfg.engine.readout, ReadoutTable::DEFAULT);
        assert_eq!(cfg.engine.thresholds.shock, 0.4);
        assert_eq!(cfg.engine.thresholds.bull, 0.65);
        assert_eq!(cfg.windows.liquidity, 5);
        assert_eq!(cfg.windows.momentum, 20);
        assert_eq!(cfg.columns.spx, "^GSPC");
        assert_eq!(cfg.columns.vix, "VIX");
    }

    #[test]
    fn test_validate_rejects_nan_engine_settings() {
        let cfg: RunnerConfig = toml::from_str(
            r#"
            [engine]
            steepness = nan
            norm_tolerance = nan
            "#,
        )
        .unwrap();
        assert!(cfg.engine.steepness.is_nan());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_volatility_window() {
        let cfg: RunnerConfig = toml::from_str("[windows]\nvolatility = 1\n").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("windows.volatility"), "{err}");
    }

    #[test]
    fn test_default_validates() {
        RunnerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = RunnerConfig::load("/nonexistent/qregime.toml").unwrap_err();
        assert!(err.to_string().contains("Could not find config file"));
    }
}
