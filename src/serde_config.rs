//! JSON support for training configuration and history (feature: `serde`).
//!
//! Parse failures and out-of-range values both surface as
//! [`Error::InvalidConfig`]. Missing fields take their `FitConfig::default()`
//! values; unknown fields are rejected.

use std::path::Path;

use crate::{Error, FitConfig, Result, TrainingHistory};

impl FitConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: FitConfig = serde_json::from_str(s)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse fit config json: {e}")))?;
        cfg.validate().map_err(|e| match e {
            Error::InvalidArgument(msg) => Error::InvalidConfig(msg),
            other => other,
        })?;
        Ok(cfg)
    }

    /// Loads a config from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidConfig(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize fit config: {e}")))
    }
}

impl TrainingHistory {
    /// Compact JSON, e.g. `{"errors":[0.5,0.25,0.0]}`.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::InvalidConfig(format!("failed to serialize history: {e}")))
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = FitConfig::from_json_str(r#"{"epochs": 50}"#).unwrap();
        assert_eq!(
            cfg,
            FitConfig {
                epochs: 50,
                ..FitConfig::default()
            }
        );

        let text = cfg.to_json_string_pretty().unwrap();
        assert_eq!(FitConfig::from_json_str(&text).unwrap(), cfg);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        let err = FitConfig::from_json_str(r#"{"epoch": 50}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = FitConfig::from_json_str(r#"{"learning_rate": -1.0}"#).unwrap_err();
        assert!(format!("{err}").contains("learning rate"));
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = FitConfig::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn history_serializes_errors() {
        let mut history = TrainingHistory::default();
        history.push(0.5);
        history.push(0.0);
        assert_eq!(history.to_json_string().unwrap(), r#"{"errors":[0.5,0.0]}"#);
    }
}
