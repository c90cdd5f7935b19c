mod defaults;

use crate::cli::{ChainArgs, SurveyArgs};
use crate::error::{CliError, Result};
use catrace::engine::config::{ChainConfig, ChainConfigBuilder, ThresholdBound};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialThresholdsConfig {
    neighbor: Option<f64>,
    adjacent: Option<f64>,
    bound: Option<ThresholdBound>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAnglesConfig {
    window: Option<[f64; 2]>,
    reference: Option<f64>,
    tolerance: Option<f64>,
    prefilter: Option<bool>,
}

/// Settings read from a TOML file; anything left unset falls back to
/// [`DefaultsConfig`] during the merge.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialChainConfig {
    thresholds: Option<PartialThresholdsConfig>,
    angles: Option<PartialAnglesConfig>,
}

/// Values given as dedicated command-line flags. These win over both `--set`
/// and the configuration file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigOverrides {
    pub neighbor_threshold: Option<f64>,
    pub adjacent_threshold: Option<f64>,
    pub threshold_bound: Option<ThresholdBound>,
    pub angle_prefilter: Option<bool>,
}

impl From<&ChainArgs> for ConfigOverrides {
    fn from(args: &ChainArgs) -> Self {
        Self {
            neighbor_threshold: args.neighbor_threshold,
            adjacent_threshold: args.adjacent_threshold,
            threshold_bound: args.exclusive.then_some(ThresholdBound::Exclusive),
            angle_prefilter: None,
        }
    }
}

impl From<&SurveyArgs> for ConfigOverrides {
    fn from(args: &SurveyArgs) -> Self {
        Self {
            neighbor_threshold: None,
            adjacent_threshold: args.adjacent_threshold,
            threshold_bound: None,
            angle_prefilter: args.no_prefilter.then_some(false),
        }
    }
}

impl PartialChainConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(
        mut self,
        overrides: &ConfigOverrides,
        set_values: &[String],
    ) -> Result<ChainConfig> {
        self.apply_set_values(set_values)?;

        let defaults = DefaultsConfig::default();
        let thresholds = self.thresholds.take().unwrap_or_default();
        let angles = self.angles.take().unwrap_or_default();
        let [window_min, window_max] = angles.window.unwrap_or(defaults.angle_window);

        ChainConfigBuilder::new()
            .neighbor_threshold(
                overrides
                    .neighbor_threshold
                    .or(thresholds.neighbor)
                    .unwrap_or(defaults.neighbor_threshold),
            )
            .adjacent_threshold(
                overrides
                    .adjacent_threshold
                    .or(thresholds.adjacent)
                    .unwrap_or(defaults.adjacent_threshold),
            )
            .threshold_bound(
                overrides
                    .threshold_bound
                    .or(thresholds.bound)
                    .unwrap_or(defaults.threshold_bound),
            )
            .angle_window(window_min, window_max)
            .reference_angle(angles.reference.unwrap_or(defaults.reference_angle))
            .angle_tolerance(angles.tolerance.unwrap_or(defaults.angle_tolerance))
            .angle_prefilter(
                overrides
                    .angle_prefilter
                    .or(angles.prefilter)
                    .unwrap_or(defaults.angle_prefilter),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "thresholds.neighbor" => {
                    self.thresholds().neighbor = Some(parse_value(key, value_str)?);
                }
                "thresholds.adjacent" => {
                    self.thresholds().adjacent = Some(parse_value(key, value_str)?);
                }
                "thresholds.bound" => {
                    self.thresholds().bound = Some(parse_bound(value_str)?);
                }
                "angles.reference" => {
                    self.angles().reference = Some(parse_value(key, value_str)?);
                }
                "angles.tolerance" => {
                    self.angles().tolerance = Some(parse_value(key, value_str)?);
                }
                "angles.prefilter" => {
                    self.angles().prefilter = Some(parse_value(key, value_str)?);
                }
                "angles.window-min" | "angles.window-max" => {
                    let value = parse_value(key, value_str)?;
                    let window = self
                        .angles()
                        .window
                        .get_or_insert(DefaultsConfig::default().angle_window);
                    if key.ends_with("min") {
                        window[0] = value;
                    } else {
                        window[1] = value;
                    }
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn thresholds(&mut self) -> &mut PartialThresholdsConfig {
        self.thresholds.get_or_insert_with(Default::default)
    }

    fn angles(&mut self) -> &mut PartialAnglesConfig {
        self.angles.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value_str
        ))
    })
}

fn parse_bound(value_str: &str) -> Result<ThresholdBound> {
    match value_str {
        "inclusive" => Ok(ThresholdBound::Inclusive),
        "exclusive" => Ok(ThresholdBound::Exclusive),
        other => Err(CliError::Config(format!(
            "Invalid value for thresholds.bound: '{}'. Expected 'inclusive' or 'exclusive'.",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use catrace::engine::config::AngleWindow;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn chain_args(extra: &[&str]) -> ChainArgs {
        let mut args = vec!["catrace", "chain", "-i", "points.txt"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Chain(args) => args,
            _ => panic!("Expected 'chain' subcommand"),
        }
    }

    #[test]
    fn empty_config_yields_defaults() {
        let config = PartialChainConfig::default()
            .merge_with_cli(&ConfigOverrides::default(), &[])
            .unwrap();
        assert_eq!(config, ChainConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "catrace.toml",
            r#"
            [thresholds]
            neighbor = 4.2
            bound = "exclusive"

            [angles]
            window = [80.0, 170.0]
            prefilter = false
            "#,
        );

        let config = PartialChainConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&ConfigOverrides::default(), &[])
            .unwrap();

        assert_eq!(config.neighbor_threshold, 4.2);
        assert_eq!(config.adjacent_threshold, 3.8);
        assert_eq!(config.threshold_bound, ThresholdBound::Exclusive);
        assert_eq!(
            config.angle_window,
            AngleWindow {
                min: 80.0,
                max: 170.0
            }
        );
        assert!(!config.angle_prefilter);
        assert_eq!(config.reference_angle, 110.0);
    }

    #[test]
    fn cli_flags_beat_set_values_which_beat_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(
            &dir,
            "catrace.toml",
            r#"
            [thresholds]
            neighbor = 4.0
            adjacent = 3.5

            [angles]
            tolerance = 40.0
            "#,
        );
        let args = chain_args(&[
            "--neighbor-threshold",
            "4.4",
            "--exclusive",
            "-S",
            "thresholds.neighbor=9.0",
            "-S",
            "thresholds.adjacent=3.6",
            "-S",
            "angles.window-max=175",
        ]);

        let config = PartialChainConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&ConfigOverrides::from(&args), &args.set_values)
            .unwrap();

        assert_eq!(config.neighbor_threshold, 4.4);
        assert_eq!(config.adjacent_threshold, 3.6);
        assert_eq!(config.threshold_bound, ThresholdBound::Exclusive);
        assert_eq!(config.angle_tolerance, 40.0);
        assert_eq!(
            config.angle_window,
            AngleWindow {
                min: 70.0,
                max: 175.0
            }
        );
    }

    #[test]
    fn survey_no_prefilter_disables_prefilter() {
        let cli = Cli::parse_from(["catrace", "survey", "-i", "p.txt", "--no-prefilter"]);
        let Commands::Survey(args) = cli.command else {
            panic!("Expected 'survey' subcommand");
        };
        let config = PartialChainConfig::default()
            .merge_with_cli(&ConfigOverrides::from(&args), &[])
            .unwrap();
        assert!(!config.angle_prefilter);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config_file(&dir, "bad.toml", "[thresholds]\nneighbour = 4.0\n");
        assert!(matches!(
            PartialChainConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PartialChainConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        for bad in ["thresholds.neighbor", "thresholds.neighbor=far", "colour=red"] {
            let result = PartialChainConfig::default()
                .merge_with_cli(&ConfigOverrides::default(), &[bad.to_string()]);
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "'{}' was accepted",
                bad
            );
        }
    }

    #[test]
    fn set_bound_accepts_only_known_modes() {
        let config = PartialChainConfig::default()
            .merge_with_cli(
                &ConfigOverrides::default(),
                &["thresholds.bound=exclusive".to_string()],
            )
            .unwrap();
        assert_eq!(config.threshold_bound, ThresholdBound::Exclusive);

        let result = PartialChainConfig::default().merge_with_cli(
            &ConfigOverrides::default(),
            &["thresholds.bound=open".to_string()],
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_merged_values_surface_as_config_errors() {
        let result = PartialChainConfig::default().merge_with_cli(
            &ConfigOverrides::default(),
            &["angles.window-min=190".to_string()],
        );
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("angle")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
