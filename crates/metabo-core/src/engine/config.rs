use crate::core::catalog::RuleCatalog;
use crate::core::models::element;
use crate::core::models::rule::{Phase, RulePriority};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Sub-model '{0}' is not defined in the rule catalog")]
    UnknownSubModel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub common_weight: f64,
    pub uncommon_weight: f64,
    /// Minimum reaction likelihood for a candidate to be flagged as passing the cutoff.
    pub likelihood_cutoff: f64,
}

impl ScoringConfig {
    pub fn weight_for(&self, priority: RulePriority) -> f64 {
        match priority {
            RulePriority::Common => self.common_weight,
            RulePriority::Uncommon => self.uncommon_weight,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            common_weight: 1.0,
            uncommon_weight: 0.5,
            likelihood_cutoff: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Sub-model passes, executed in this order.
    pub sub_models: Vec<String>,
    pub fallback_sub_model: Option<String>,
    pub threads: usize,
    pub min_heavy_atoms: usize,
    pub score_tie_epsilon: f64,
    pub allowed_elements: BTreeSet<String>,
    pub scoring: ScoringConfig,
    pub phase_filter: Option<Phase>,
    pub max_ranked: Option<usize>,
    pub exclude_parent: bool,
}

impl RunConfig {
    pub fn validate_against(&self, catalog: &RuleCatalog) -> Result<(), ConfigError> {
        for name in self.sub_models.iter().chain(self.fallback_sub_model.iter()) {
            if !catalog.contains(name) {
                return Err(ConfigError::UnknownSubModel(name.clone()));
            }
        }
        Ok(())
    }

    pub fn is_element_allowed(&self, symbol: &str) -> bool {
        self.allowed_elements.contains(symbol.trim())
    }
}

pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[derive(Default)]
pub struct RunConfigBuilder {
    sub_models: Vec<String>,
    fallback_sub_model: Option<String>,
    threads: Option<usize>,
    min_heavy_atoms: Option<usize>,
    score_tie_epsilon: Option<f64>,
    allowed_elements: Option<BTreeSet<String>>,
    scoring: Option<ScoringConfig>,
    phase_filter: Option<Phase>,
    max_ranked: Option<usize>,
    exclude_parent: Option<bool>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub_model(mut self, name: &str) -> Self {
        self.sub_models.push(name.to_string());
        self
    }
    pub fn sub_models<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_models.extend(names.into_iter().map(Into::into));
        self
    }
    pub fn fallback_sub_model(mut self, name: Option<&str>) -> Self {
        self.fallback_sub_model = name.map(str::to_string);
        self
    }
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
    pub fn min_heavy_atoms(mut self, count: usize) -> Self {
        self.min_heavy_atoms = Some(count);
        self
    }
    pub fn score_tie_epsilon(mut self, epsilon: f64) -> Self {
        self.score_tie_epsilon = Some(epsilon);
        self
    }
    pub fn allowed_elements<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_elements = Some(symbols.into_iter().map(Into::into).collect());
        self
    }
    pub fn scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = Some(scoring);
        self
    }
    pub fn phase_filter(mut self, phase: Option<Phase>) -> Self {
        self.phase_filter = phase;
        self
    }
    pub fn max_ranked(mut self, limit: Option<usize>) -> Self {
        self.max_ranked = limit;
        self
    }
    pub fn exclude_parent(mut self, exclude: bool) -> Self {
        self.exclude_parent = Some(exclude);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        if self.sub_models.is_empty() {
            return Err(ConfigError::MissingParameter("sub_models"));
        }

        let threads = self.threads.unwrap_or_else(default_thread_count);
        if threads == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "threads",
                reason: "must be at least 1".to_string(),
            });
        }

        let score_tie_epsilon = self.score_tie_epsilon.unwrap_or(1e-6);
        if !(score_tie_epsilon >= 0.0 && score_tie_epsilon.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "score_tie_epsilon",
                reason: format!("must be a finite, non-negative number (got {score_tie_epsilon})"),
            });
        }

        let scoring = self.scoring.unwrap_or_default();
        for (name, value) in [
            ("common_weight", scoring.common_weight),
            ("uncommon_weight", scoring.uncommon_weight),
            ("likelihood_cutoff", scoring.likelihood_cutoff),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must lie within [0, 1] (got {value})"),
                });
            }
        }

        let allowed_elements = self.allowed_elements.unwrap_or_else(|| {
            element::default_allowed_elements()
                .map(str::to_string)
                .collect()
        });
        if allowed_elements.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "allowed_elements",
                reason: "at least one element must be allowed".to_string(),
            });
        }

        if self.max_ranked == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_ranked",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        Ok(RunConfig {
            sub_models: self.sub_models,
            fallback_sub_model: self.fallback_sub_model,
            threads,
            min_heavy_atoms: self.min_heavy_atoms.unwrap_or(3),
            score_tie_epsilon,
            allowed_elements,
            scoring,
            phase_filter: self.phase_filter,
            max_ranked: self.max_ranked,
            exclude_parent: self.exclude_parent.unwrap_or(true),
        })
    }
}
