//! Analysis configuration.
//!
//! All tunables of one analysis run in a single serde struct:
//! - Smoothing half-window
//! - Heel-strike refractory period and edge margin
//! - Landmark visibility threshold
//! - Resolution of normalized gait curves
//!
//! Every field has a default, so an empty TOML file is a valid configuration.
//! Selected fields can be overridden from `GAIT_*` environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GaitError, Result};
use crate::event_detection::EventDetectorConfig;
use crate::phase_stats::DEFAULT_CURVE_POINTS;
use crate::signal::SmoothingConfig;

/// Environment variable overriding [`SmoothingConfig::half_window`].
pub const ENV_SMOOTHING_HALF_WINDOW: &str = "GAIT_SMOOTHING_HALF_WINDOW";
/// Environment variable overriding [`EventDetectorConfig::refractory_s`].
pub const ENV_REFRACTORY_S: &str = "GAIT_REFRACTORY_S";
/// Environment variable overriding [`AnalysisConfig::min_visibility`].
pub const ENV_MIN_VISIBILITY: &str = "GAIT_MIN_VISIBILITY";

/// Configuration for a gait analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub smoothing: SmoothingConfig,
    pub detector: EventDetectorConfig,
    /// Landmarks below this visibility make a frame unusable. 0 accepts all.
    pub min_visibility: f64,
    /// Samples per normalized gait curve (0–100 % inclusive).
    pub curve_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingConfig::default(),
            detector: EventDetectorConfig::default(),
            min_visibility: 0.0,
            curve_points: DEFAULT_CURVE_POINTS,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded analysis config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        let refractory = self.detector.refractory_s;
        if !refractory.is_finite() || refractory < 0.0 {
            return Err(GaitError::Validation(format!(
                "detector.refractory_s must be finite and >= 0, got {refractory}"
            )));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(GaitError::Validation(format!(
                "min_visibility must be in [0, 1], got {}",
                self.min_visibility
            )));
        }
        if self.curve_points < 2 {
            return Err(GaitError::Validation(format!(
                "curve_points must be at least 2, got {}",
                self.curve_points
            )));
        }
        Ok(())
    }

    /// Apply `GAIT_*` overrides from the process environment, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored with a warning so a stray variable never
    /// aborts a run.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(k) = parse_override::<usize, _>(&lookup, ENV_SMOOTHING_HALF_WINDOW) {
            self.smoothing.half_window = k;
        }
        if let Some(s) = parse_override::<f64, _>(&lookup, ENV_REFRACTORY_S) {
            self.detector.refractory_s = s;
        }
        if let Some(v) = parse_override::<f64, _>(&lookup, ENV_MIN_VISIBILITY) {
            self.min_visibility = v;
        }
        self.validate()
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!(key, value = %raw, "config override from environment");
            Some(value)
        }
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable config override");
            None
        }
    }
}

/// Reject frame rates that cannot time a gait cycle.
pub fn validate_fps(fps: f64) -> Result<f64> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(GaitError::InvalidFrameRate(fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing.half_window, 2);
        assert_eq!(config.detector.refractory_s, 0.3);
        assert_eq!(config.detector.edge_margin, 2);
        assert_eq!(config.curve_points, 101);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
            min_visibility = 0.5

            [detector]
            refractory_s = 0.4
        "#;
        let config = AnalysisConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.min_visibility, 0.5);
        assert_eq!(config.detector.refractory_s, 0.4);
        assert_eq!(config.detector.edge_margin, 2);
        assert_eq!(config.smoothing.half_window, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("min_visibility = 1.5"),
            Err(GaitError::Validation(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("curve_points = 1"),
            Err(GaitError::Validation(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("[detector]\nrefractory_s = -0.1"),
            Err(GaitError::Validation(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("curve_points = \"many\""),
            Err(GaitError::TomlParse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[smoothing]\nhalf_window = 0").unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.smoothing.half_window, 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AnalysisConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(GaitError::Io(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_SMOOTHING_HALF_WINDOW, "4"),
            (ENV_REFRACTORY_S, " 0.25 "),
            (ENV_MIN_VISIBILITY, "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AnalysisConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.smoothing.half_window, 4);
        assert_eq!(config.detector.refractory_s, 0.25);
        assert_eq!(config.min_visibility, 0.0);
    }

    #[test]
    fn test_override_out_of_range_fails_validation() {
        let mut config = AnalysisConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_MIN_VISIBILITY).then(|| "2.0".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_fps() {
        assert_eq!(validate_fps(30.0).unwrap(), 30.0);
        assert!(matches!(validate_fps(0.0), Err(GaitError::InvalidFrameRate(_))));
        assert!(matches!(validate_fps(f64::INFINITY), Err(GaitError::InvalidFrameRate(_))));
        assert!(validate_fps(f64::NAN).is_err());
    }
}
