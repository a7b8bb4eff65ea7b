use super::defaults::DefaultsConfig;
use crate::core::models::rule::Phase;
use crate::engine::config::{ConfigError, RunConfig, RunConfigBuilder, ScoringConfig};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid override '{0}'. Expected KEY=VALUE.")]
    MalformedOverride(String),
    #[error("Unsupported configuration key: '{0}'")]
    UnsupportedKey(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScoringConfig {
    pub common_weight: Option<f64>,
    pub uncommon_weight: Option<f64>,
    pub likelihood_cutoff: Option<f64>,
}

/// A run configuration as written in a TOML file. Every field is optional and falls back to
/// [`DefaultsConfig`].
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub sub_models: Option<Vec<String>>,
    pub fallback_sub_model: Option<String>,
    pub threads: Option<usize>,
    pub min_heavy_atoms: Option<usize>,
    pub score_tie_epsilon: Option<f64>,
    pub allowed_elements: Option<Vec<String>>,
    pub phase: Option<Phase>,
    pub max_ranked: Option<usize>,
    pub exclude_parent: Option<bool>,
    pub scoring: Option<FileScoringConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigFileError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        debug!(path = %path.display(), "Loaded run configuration file.");
        Ok(config)
    }

    /// Applies `KEY=VALUE` pairs on top of the file values. Keys use the file's spelling;
    /// scoring keys are prefixed with `scoring.` and `sub-models` takes a comma-separated list.
    pub fn apply_overrides(mut self, pairs: &[String]) -> Result<Self, ConfigFileError> {
        for pair in pairs {
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ConfigFileError::MalformedOverride(pair.clone()));
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "sub-models" => {
                    self.sub_models = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
                }
                "fallback-sub-model" => {
                    self.fallback_sub_model = (!value.is_empty()).then(|| value.to_string());
                }
                "threads" => self.threads = Some(parse_value(key, value)?),
                "min-heavy-atoms" => self.min_heavy_atoms = Some(parse_value(key, value)?),
                "score-tie-epsilon" => self.score_tie_epsilon = Some(parse_value(key, value)?),
                "phase" => self.phase = Some(parse_value(key, value)?),
                "max-ranked" => self.max_ranked = Some(parse_value(key, value)?),
                "exclude-parent" => self.exclude_parent = Some(parse_value(key, value)?),
                "scoring.common-weight" => {
                    self.scoring.get_or_insert_with(Default::default).common_weight =
                        Some(parse_value(key, value)?);
                }
                "scoring.uncommon-weight" => {
                    self.scoring.get_or_insert_with(Default::default).uncommon_weight =
                        Some(parse_value(key, value)?);
                }
                "scoring.likelihood-cutoff" => {
                    self.scoring.get_or_insert_with(Default::default).likelihood_cutoff =
                        Some(parse_value(key, value)?);
                }
                _ => return Err(ConfigFileError::UnsupportedKey(key.to_string())),
            }
        }
        Ok(self)
    }

    /// Merges the file values over `defaults` and validates the result.
    pub fn into_run_config(self, defaults: &DefaultsConfig) -> Result<RunConfig, ConfigFileError> {
        let scoring_file = self.scoring.unwrap_or_default();
        let scoring = ScoringConfig {
            common_weight: scoring_file
                .common_weight
                .unwrap_or(defaults.scoring.common_weight),
            uncommon_weight: scoring_file
                .uncommon_weight
                .unwrap_or(defaults.scoring.uncommon_weight),
            likelihood_cutoff: scoring_file
                .likelihood_cutoff
                .unwrap_or(defaults.scoring.likelihood_cutoff),
        };

        let config = RunConfigBuilder::new()
            .sub_models(self.sub_models.unwrap_or_default())
            .fallback_sub_model(self.fallback_sub_model.as_deref())
            .threads(self.threads.unwrap_or(defaults.threads))
            .min_heavy_atoms(self.min_heavy_atoms.unwrap_or(defaults.min_heavy_atoms))
            .score_tie_epsilon(self.score_tie_epsilon.unwrap_or(defaults.score_tie_epsilon))
            .allowed_elements(
                self.allowed_elements
                    .unwrap_or_else(|| defaults.allowed_elements.clone()),
            )
            .scoring(scoring)
            .phase_filter(self.phase)
            .max_ranked(self.max_ranked)
            .exclude_parent(self.exclude_parent.unwrap_or(defaults.exclude_parent))
            .build()?;
        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigFileError> {
    value.parse().map_err(|_| ConfigFileError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn overrides(pairs: &[&str]) -> Vec<String> {
        pairs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn loads_kebab_case_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
sub-models = ["phase1", "phase2"]
fallback-sub-model = "combined"
threads = 2
min-heavy-atoms = 4
phase = "phase-one"
allowed-elements = ["C", "N", "O"]

[scoring]
uncommon-weight = 0.25
"#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path)
            .unwrap()
            .into_run_config(&DefaultsConfig::default())
            .unwrap();

        assert_eq!(config.sub_models, vec!["phase1", "phase2"]);
        assert_eq!(config.fallback_sub_model.as_deref(), Some("combined"));
        assert_eq!(config.threads, 2);
        assert_eq!(config.min_heavy_atoms, 4);
        assert_eq!(config.phase_filter, Some(Phase::PhaseOne));
        assert_eq!(config.scoring.uncommon_weight, 0.25);
        assert_eq!(config.scoring.common_weight, 1.0);
        assert!(config.is_element_allowed("N"));
        assert!(!config.is_element_allowed("S"));
        assert!(config.exclude_parent);
        assert_eq!(config.score_tie_epsilon, 1e-6);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(&path, "sub-models = [\"a\"]\nthread-count = 2\n").unwrap();
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Toml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = FileConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Io { .. }));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let file = FileConfig {
            sub_models: Some(vec!["phase1".to_string()]),
            threads: Some(8),
            ..FileConfig::default()
        };
        let config = file
            .apply_overrides(&overrides(&[
                "threads=3",
                "sub-models=phase1, phase2",
                "scoring.likelihood-cutoff=0.4",
                "exclude-parent=false",
                "max-ranked=10",
                "phase=phase2",
            ]))
            .unwrap()
            .into_run_config(&DefaultsConfig::default())
            .unwrap();

        assert_eq!(config.threads, 3);
        assert_eq!(config.sub_models, vec!["phase1", "phase2"]);
        assert_eq!(config.scoring.likelihood_cutoff, 0.4);
        assert!(!config.exclude_parent);
        assert_eq!(config.max_ranked, Some(10));
        assert_eq!(config.phase_filter, Some(Phase::PhaseTwo));
    }

    #[test]
    fn malformed_overrides_are_reported() {
        let err = FileConfig::default()
            .apply_overrides(&overrides(&["threads"]))
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::MalformedOverride(p) if p == "threads"));

        let err = FileConfig::default()
            .apply_overrides(&overrides(&["threads=many"]))
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { key, .. } if key == "threads"));

        let err = FileConfig::default()
            .apply_overrides(&overrides(&["colour=blue"]))
            .unwrap_err();
        assert!(matches!(err, ConfigFileError::UnsupportedKey(k) if k == "colour"));
    }

    #[test]
    fn defaults_alone_still_need_sub_models() {
        let err = FileConfig::default()
            .into_run_config(&DefaultsConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::Config(ConfigError::MissingParameter("sub_models"))
        ));
    }

    #[test]
    fn out_of_range_weight_fails_validation() {
        let err = FileConfig::default()
            .apply_overrides(&overrides(&["sub-models=a", "scoring.common-weight=1.5"]))
            .unwrap()
            .into_run_config(&DefaultsConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::Config(ConfigError::InvalidParameter { name: "common_weight", .. })
        ));
    }

    #[test]
    fn default_allow_list_is_sorted_and_complete() {
        let defaults = DefaultsConfig::default();
        assert_eq!(
            defaults.allowed_elements,
            vec!["Br", "C", "Cl", "F", "H", "I", "N", "O", "P", "S"]
        );
        assert!(defaults.threads >= 1);
    }
}
