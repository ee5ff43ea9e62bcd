//! Runtime configuration
//!
//! Resolved in order, later sources winning: built-in defaults, a TOML file
//! named by `SHOPPING_CONFIG`, then the `SHOPPING_TEST_SIZE` and
//! `SHOPPING_SEED` environment variables.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::errors::{Result, ShoppingError};

/// Fraction of the dataset held out for evaluation.
pub const TEST_SIZE: f64 = 0.4;

pub const CONFIG_PATH_VAR: &str = "SHOPPING_CONFIG";
pub const TEST_SIZE_VAR: &str = "SHOPPING_TEST_SIZE";
pub const SEED_VAR: &str = "SHOPPING_SEED";

/// Predictor configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Test subset fraction, strictly between 0 and 1
    pub test_size: f64,
    /// Seed for the train/test shuffle; unseeded when absent
    pub seed: Option<u64>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            test_size: TEST_SIZE,
            seed: None,
        }
    }
}

impl PredictorConfig {
    /// Resolve configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Resolve configuration using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            ShoppingError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ShoppingError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(TEST_SIZE_VAR) {
            self.test_size = val
                .trim()
                .parse()
                .map_err(|_| ShoppingError::Config(format!("{TEST_SIZE_VAR}: invalid number '{val}'")))?;
        }

        if let Some(val) = lookup(SEED_VAR) {
            let seed = val
                .trim()
                .parse()
                .map_err(|_| ShoppingError::Config(format!("{SEED_VAR}: invalid seed '{val}'")))?;
            self.seed = Some(seed);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ShoppingError::InvalidTestFraction(self.test_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PredictorConfig::load_with(env(&[])).unwrap();
        assert_eq!(config, PredictorConfig::default());
        assert_eq!(config.test_size, 0.4);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_env_overrides() {
        let config =
            PredictorConfig::load_with(env(&[(TEST_SIZE_VAR, "0.25"), (SEED_VAR, " 42 ")])).unwrap();
        assert_eq!(config.test_size, 0.25);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_file_then_env() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "test_size = 0.3").unwrap();
        writeln!(file, "seed = 7").unwrap();
        file.flush().unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let config = PredictorConfig::load_with(env(&[(CONFIG_PATH_VAR, path.as_str())])).unwrap();
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.seed, Some(7));

        let config =
            PredictorConfig::load_with(env(&[(CONFIG_PATH_VAR, path.as_str()), (SEED_VAR, "9")])).unwrap();
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed = 1").unwrap();
        file.flush().unwrap();

        let config = PredictorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.test_size, TEST_SIZE);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = PredictorConfig::load_with(env(&[(SEED_VAR, "abc")])).unwrap_err();
        assert!(matches!(err, ShoppingError::Config(_)));

        let err = PredictorConfig::load_with(env(&[(TEST_SIZE_VAR, "1.0")])).unwrap_err();
        assert!(matches!(err, ShoppingError::InvalidTestFraction(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "neighbours = 3").unwrap();
        file.flush().unwrap();

        let err = PredictorConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ShoppingError::Config(_)));
    }
}
