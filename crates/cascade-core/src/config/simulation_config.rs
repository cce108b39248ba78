//! Per-run simulation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Immutable configuration for one simulation run.
///
/// Exactly six options are recognized; unknown keys are rejected.
/// Every option may be omitted and falls back to its compiled default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Health boundary below which a service is considered failing.
    pub threshold: f64,
    /// Decay factor applied to failure and heal propagation.
    pub alpha: f64,
    /// Ticks a service must stay failed before healing begins.
    pub cooldown: u32,
    /// Ceiling for a service's own heal step.
    pub heal_to: f64,
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Seed for the perturbation RNG.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            threshold: constants::DEFAULT_THRESHOLD,
            alpha: constants::DEFAULT_ALPHA,
            cooldown: constants::DEFAULT_COOLDOWN,
            heal_to: constants::DEFAULT_HEAL_TO,
            ticks: constants::DEFAULT_TICKS,
            seed: constants::DEFAULT_SEED,
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ticks: Option<u32>,
    pub seed: Option<u64>,
}

/// Supported on-disk config encodings, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration with 3-layer resolution.
    ///
    /// Resolution order (highest priority first):
    /// 1. CLI flags
    /// 2. Environment variables (`CASCADE_TICKS`, `CASCADE_SEED`)
    /// 3. Config file at `path` (`.toml`, `.yaml` or `.yml`)
    /// 4. Compiled defaults
    pub fn load(path: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        })?;

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let mut config = match format {
            ConfigFormat::Toml => Self::parse_toml(&content, &path.display().to_string())?,
            ConfigFormat::Yaml => Self::parse_yaml(&content, &path.display().to_string())?,
        };

        config.apply_env_overrides();
        if let Some(cli) = cli_overrides {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        tracing::debug!(?config, path = %path.display(), "simulation config loaded");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_toml(toml_str, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_yaml(yaml_str, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    fn parse_yaml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty YAML document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "threshold".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "alpha".to_string(),
                message: "must be a finite, non-negative number".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.heal_to) {
            return Err(ConfigError::ValidationFailed {
                field: "heal_to".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CASCADE_TICKS") {
            if let Ok(v) = val.parse::<u32>() {
                self.ticks = v;
            }
        }
        if let Ok(val) = std::env::var("CASCADE_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                self.seed = v;
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(v) = cli.ticks {
            self.ticks = v;
        }
        if let Some(v) = cli.seed {
            self.seed = v;
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_picked_by_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn cli_overrides_only_touch_set_fields() {
        let mut config = SimulationConfig::default();
        config.apply_cli_overrides(&CliOverrides {
            ticks: Some(7),
            seed: None,
        });
        assert_eq!(config.ticks, 7);
        assert_eq!(config.seed, constants::DEFAULT_SEED);
    }
}
