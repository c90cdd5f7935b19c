use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the distance class whose pairs are linked into the chain.
pub const NEIGHBOR_CLASS: &str = "neighbor";
/// Name of the tighter distance class used for adjacency and angle reachability.
pub const ADJACENT_CLASS: &str = "adjacent";

pub mod defaults {
    pub const NEIGHBOR_THRESHOLD: f64 = 4.5;
    pub const ADJACENT_THRESHOLD: f64 = 3.8;
    pub const ANGLE_WINDOW_MIN: f64 = 70.0;
    pub const ANGLE_WINDOW_MAX: f64 = 180.0;
    pub const REFERENCE_ANGLE: f64 = 110.0;
    pub const ANGLE_TOLERANCE: f64 = 30.0;
    pub const ANGLE_PREFILTER: bool = true;
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Whether a pair exactly at the cutoff distance belongs to the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdBound {
    #[default]
    Inclusive,
    Exclusive,
}

impl ThresholdBound {
    /// True for `0 < distance <= cutoff` (or `< cutoff` when exclusive).
    #[inline]
    pub fn admits(self, distance: f64, cutoff: f64) -> bool {
        distance > 0.0
            && match self {
                ThresholdBound::Inclusive => distance <= cutoff,
                ThresholdBound::Exclusive => distance < cutoff,
            }
    }
}

/// A named distance cutoff producing one bucket of the neighbor graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceClass {
    pub name: String,
    pub cutoff: f64,
}

impl DistanceClass {
    pub fn new(name: &str, cutoff: f64) -> Self {
        Self {
            name: name.to_string(),
            cutoff,
        }
    }
}

/// Inclusive range of accepted angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleWindow {
    pub min: f64,
    pub max: f64,
}

impl AngleWindow {
    #[inline]
    pub fn contains(&self, angle: f64) -> bool {
        self.min <= angle && angle <= self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub neighbor_threshold: f64,
    pub adjacent_threshold: f64,
    pub threshold_bound: ThresholdBound,
    pub angle_window: AngleWindow,
    pub reference_angle: f64,
    /// Angular deviation, in degrees, that scores as 1.0.
    pub angle_tolerance: f64,
    /// Only score triples whose two arms are both shorter than
    /// `adjacent_threshold`.
    pub angle_prefilter: bool,
}

impl ChainConfig {
    pub fn distance_classes(&self) -> Vec<DistanceClass> {
        vec![
            DistanceClass::new(NEIGHBOR_CLASS, self.neighbor_threshold),
            DistanceClass::new(ADJACENT_CLASS, self.adjacent_threshold),
        ]
    }

    /// Deviation of `angle` from the reference, in units of the tolerance.
    #[inline]
    pub fn angle_score(&self, angle: f64) -> f64 {
        (self.reference_angle - angle).abs() / self.angle_tolerance
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            neighbor_threshold: defaults::NEIGHBOR_THRESHOLD,
            adjacent_threshold: defaults::ADJACENT_THRESHOLD,
            threshold_bound: ThresholdBound::default(),
            angle_window: AngleWindow {
                min: defaults::ANGLE_WINDOW_MIN,
                max: defaults::ANGLE_WINDOW_MAX,
            },
            reference_angle: defaults::REFERENCE_ANGLE,
            angle_tolerance: defaults::ANGLE_TOLERANCE,
            angle_prefilter: defaults::ANGLE_PREFILTER,
        }
    }
}

#[derive(Default)]
pub struct ChainConfigBuilder {
    neighbor_threshold: Option<f64>,
    adjacent_threshold: Option<f64>,
    threshold_bound: Option<ThresholdBound>,
    angle_window: Option<AngleWindow>,
    reference_angle: Option<f64>,
    angle_tolerance: Option<f64>,
    angle_prefilter: Option<bool>,
}

impl ChainConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighbor_threshold(mut self, threshold: f64) -> Self {
        self.neighbor_threshold = Some(threshold);
        self
    }
    pub fn adjacent_threshold(mut self, threshold: f64) -> Self {
        self.adjacent_threshold = Some(threshold);
        self
    }
    pub fn threshold_bound(mut self, bound: ThresholdBound) -> Self {
        self.threshold_bound = Some(bound);
        self
    }
    pub fn angle_window(mut self, min: f64, max: f64) -> Self {
        self.angle_window = Some(AngleWindow { min, max });
        self
    }
    pub fn reference_angle(mut self, degrees: f64) -> Self {
        self.reference_angle = Some(degrees);
        self
    }
    pub fn angle_tolerance(mut self, degrees: f64) -> Self {
        self.angle_tolerance = Some(degrees);
        self
    }
    pub fn angle_prefilter(mut self, enabled: bool) -> Self {
        self.angle_prefilter = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ChainConfig, ConfigError> {
        let config = ChainConfig {
            neighbor_threshold: self
                .neighbor_threshold
                .ok_or(ConfigError::MissingParameter("neighbor_threshold"))?,
            adjacent_threshold: self
                .adjacent_threshold
                .ok_or(ConfigError::MissingParameter("adjacent_threshold"))?,
            threshold_bound: self
                .threshold_bound
                .ok_or(ConfigError::MissingParameter("threshold_bound"))?,
            angle_window: self
                .angle_window
                .ok_or(ConfigError::MissingParameter("angle_window"))?,
            reference_angle: self
                .reference_angle
                .ok_or(ConfigError::MissingParameter("reference_angle"))?,
            angle_tolerance: self
                .angle_tolerance
                .ok_or(ConfigError::MissingParameter("angle_tolerance"))?,
            angle_prefilter: self
                .angle_prefilter
                .ok_or(ConfigError::MissingParameter("angle_prefilter"))?,
        };
        validate(&config)?;
        Ok(config)
    }
}

/// Checks the value ranges enforced by [`ChainConfigBuilder::build`].
pub(crate) fn validate(config: &ChainConfig) -> Result<(), ConfigError> {
    let invalid = |parameter: &'static str, reason: String| {
        Err(ConfigError::InvalidValue { parameter, reason })
    };

    for (parameter, value) in [
        ("neighbor_threshold", config.neighbor_threshold),
        ("adjacent_threshold", config.adjacent_threshold),
        ("angle_tolerance", config.angle_tolerance),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return invalid(parameter, format!("must be a positive number, got {value}"));
        }
    }

    let AngleWindow { min, max } = config.angle_window;
    if !(0.0..=180.0).contains(&min) || !(0.0..=180.0).contains(&max) || min > max {
        return invalid(
            "angle_window",
            format!("expected 0 <= min <= max <= 180, got [{min}, {max}]"),
        );
    }
    if !(0.0..=180.0).contains(&config.reference_angle) {
        return invalid(
            "reference_angle",
            format!("must lie in [0, 180], got {}", config.reference_angle),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> ChainConfigBuilder {
        ChainConfigBuilder::new()
            .neighbor_threshold(4.5)
            .adjacent_threshold(3.8)
            .threshold_bound(ThresholdBound::Inclusive)
            .angle_window(70.0, 180.0)
            .reference_angle(110.0)
            .angle_tolerance(30.0)
            .angle_prefilter(true)
    }

    #[test]
    fn builder_with_all_parameters_matches_default() {
        assert_eq!(complete_builder().build().unwrap(), ChainConfig::default());
    }

    #[test]
    fn builder_reports_first_missing_parameter() {
        let result = ChainConfigBuilder::new().neighbor_threshold(4.5).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("adjacent_threshold"))
        );
    }

    #[test]
    fn builder_rejects_non_positive_threshold() {
        let result = complete_builder().neighbor_threshold(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "neighbor_threshold",
                ..
            })
        ));
        let result = complete_builder().adjacent_threshold(f64::NAN).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "adjacent_threshold",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_inverted_or_out_of_range_window() {
        assert!(complete_builder().angle_window(120.0, 90.0).build().is_err());
        assert!(complete_builder().angle_window(-5.0, 90.0).build().is_err());
        assert!(complete_builder().angle_window(70.0, 181.0).build().is_err());
        assert!(complete_builder().reference_angle(200.0).build().is_err());
    }

    #[test]
    fn inclusive_bound_admits_cutoff_but_exclusive_does_not() {
        assert!(ThresholdBound::Inclusive.admits(1.5, 1.5));
        assert!(!ThresholdBound::Exclusive.admits(1.5, 1.5));
        assert!(ThresholdBound::Exclusive.admits(1.4, 1.5));
    }

    #[test]
    fn zero_distance_is_never_admitted() {
        assert!(!ThresholdBound::Inclusive.admits(0.0, 1.5));
        assert!(!ThresholdBound::Exclusive.admits(0.0, 1.5));
    }

    #[test]
    fn angle_score_is_deviation_over_tolerance() {
        let config = ChainConfig::default();
        assert!((config.angle_score(90.0) - 20.0 / 30.0).abs() < 1e-12);
        assert_eq!(config.angle_score(110.0), 0.0);
        assert!((config.angle_score(140.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = ChainConfig::default().angle_window;
        assert!(window.contains(70.0));
        assert!(window.contains(180.0));
        assert!(!window.contains(69.9));
    }

    #[test]
    fn distance_classes_are_named_neighbor_and_adjacent() {
        let classes = ChainConfig::default().distance_classes();
        assert_eq!(
            classes,
            vec![
                DistanceClass::new(NEIGHBOR_CLASS, 4.5),
                DistanceClass::new(ADJACENT_CLASS, 3.8),
            ]
        );
    }
}
