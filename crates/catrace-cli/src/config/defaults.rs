use catrace::engine::config::{ThresholdBound, defaults};

/// Built-in values used for every setting absent from the CLI, `--set`, and
/// the configuration file.
pub struct DefaultsConfig {
    pub neighbor_threshold: f64,
    pub adjacent_threshold: f64,
    pub threshold_bound: ThresholdBound,
    pub angle_window: [f64; 2],
    pub reference_angle: f64,
    pub angle_tolerance: f64,
    pub angle_prefilter: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            neighbor_threshold: defaults::NEIGHBOR_THRESHOLD,
            adjacent_threshold: defaults::ADJACENT_THRESHOLD,
            threshold_bound: ThresholdBound::default(),
            angle_window: [defaults::ANGLE_WINDOW_MIN, defaults::ANGLE_WINDOW_MAX],
            reference_angle: defaults::REFERENCE_ANGLE,
            angle_tolerance: defaults::ANGLE_TOLERANCE,
            angle_prefilter: defaults::ANGLE_PREFILTER,
        }
    }
}
