use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ZoneError;
use crate::indicator::IndicatorSpec;
use crate::select::{HorizonPolicy, SelectionParams, ThresholdRule};

/// Every knob the front end exposes, as one immutable record.
///
/// Missing fields fall back to the dashboard defaults:
/// 5 zones, 500 m coverage, accessibility (`Ai`) ascending then population
/// descending, and a strict "below threshold" stop rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Number of zones to select.
    pub n_candidates: usize,
    /// Minimum coverage radius of a zone, in meters.
    pub radius_m: f64,
    /// Maximum (or minimum, per `threshold_rule`) primary value accepted.
    pub threshold: f64,
    pub threshold_rule: ThresholdRule,
    pub primary: IndicatorSpec,
    pub secondary: IndicatorSpec,
    pub horizon: HorizonPolicy,
    /// Random points of interest drawn per zone.
    pub sample_size: usize,
    /// Top-ranked points of interest kept per zone.
    pub top_per_zone: usize,
    /// Ranking used to pick the top points of interest.
    pub poi_ranking: IndicatorSpec,
    /// Indicators shown on the radar chart, in display order.
    pub radar_indicators: Vec<String>,
    /// Seed for the random sample; `None` draws a fresh sample each run.
    pub seed: Option<u64>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            n_candidates: 5,
            radius_m: 500.0,
            threshold: 0.5,
            threshold_rule: ThresholdRule::Below,
            primary: IndicatorSpec::ascending("Ai"),
            secondary: IndicatorSpec::descending("population_2020"),
            horizon: HorizonPolicy::default(),
            sample_size: 3,
            top_per_zone: 3,
            poi_ranking: IndicatorSpec::descending("area_m2"),
            radar_indicators: vec!["population_2020".to_string(), "Ai".to_string(), "area_m2".to_string()],
            seed: None,
        }
    }
}

impl StudyConfig {
    /// Parse a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse study config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read study config: {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check dataset-independent parameters.
    pub fn validate(&self) -> std::result::Result<(), ZoneError> {
        crate::grid::check_radius(self.radius_m)?;
        if !self.threshold.is_finite() {
            return Err(ZoneError::invalid_parameter("threshold", self.threshold, "must be finite"));
        }
        self.horizon.validate()
    }

    /// Parameters of the zone selection pass.
    pub fn selection(&self) -> SelectionParams {
        SelectionParams::new(self.n_candidates, self.radius_m, self.threshold, self.primary.clone(), self.secondary.clone())
            .with_rule(self.threshold_rule)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(StudyConfig::from_json_str("{}").unwrap(), StudyConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = StudyConfig::from_json_str(r#"{
            "n_candidates": 12,
            "threshold_rule": "at_most",
            "primary": {"name": "income_pc", "direction": "descending"},
            "horizon": {"max_horizon": 3},
            "seed": 9
        }"#).unwrap();

        assert_eq!(config.n_candidates, 12);
        assert_eq!(config.threshold_rule, ThresholdRule::AtMost);
        assert_eq!(config.primary, IndicatorSpec::descending("income_pc"));
        assert_eq!(config.horizon.max_horizon, 3);
        assert_eq!(config.horizon.target_fraction, HorizonPolicy::default().target_fraction);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.radius_m, 500.0);

        let params = config.selection();
        assert_eq!(params.rule, ThresholdRule::AtMost);
        assert_eq!(params.n_candidates, 12);
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(StudyConfig::from_json_str(r#"{"radius_m": -10}"#).is_err());
        assert!(StudyConfig::from_json_str(r#"{"n_candidates": -1}"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"radius_m": 1500, "sample_size": 5}}"#).unwrap();

        let config = StudyConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.radius_m, 1500.0);
        assert_eq!(config.sample_size, 5);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(StudyConfig::from_json_file(Path::new("/definitely/not/here.json")).is_err());
    }
}
