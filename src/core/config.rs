// Per-handle reader configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::constants::{BRACKET_ROUNDS, INTERPOLATION_TOLERANCE_SECS};
use crate::core::error::{NavError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Largest gap between adjacent records that may be bridged by interpolation.
    pub interpolation_tolerance_secs: f64,
    /// Interpolation-search probes before the linear walk.
    pub bracket_rounds: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            interpolation_tolerance_secs: INTERPOLATION_TOLERANCE_SECS,
            bracket_rounds: BRACKET_ROUNDS,
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| NavError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<()> {
        let tol = self.interpolation_tolerance_secs;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(NavError::Config(format!(
                "interpolation_tolerance_secs must be positive, got {tol}"
            )));
        }
        if self.bracket_rounds == 0 {
            return Err(NavError::Config(
                "bracket_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.interpolation_tolerance_secs, 1.0);
        assert_eq!(config.bracket_rounds, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = StoreConfig::from_json_str(r#"{ "bracket_rounds": 5 }"#).unwrap();
        assert_eq!(config.bracket_rounds, 5);
        assert_eq!(config.interpolation_tolerance_secs, 1.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            StoreConfig::from_json_str(r#"{ "interpolation_tolerance_secs": 0.0 }"#),
            Err(NavError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_json_str(r#"{ "bracket_rounds": 0 }"#),
            Err(NavError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_json_str("not json"),
            Err(NavError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = StoreConfig::from_json_file("/nonexistent/reader.json").unwrap_err();
        assert!(matches!(err, NavError::FileUnavailable { .. }));
    }
}
