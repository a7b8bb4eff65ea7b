use crate::core::models::element;
use crate::engine::config::{ScoringConfig, default_thread_count};

/// Values a run falls back to when neither the config file nor an override sets them.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub threads: usize,
    pub min_heavy_atoms: usize,
    pub score_tie_epsilon: f64,
    pub scoring: ScoringConfig,
    pub allowed_elements: Vec<String>,
    pub exclude_parent: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let mut allowed_elements: Vec<String> = element::default_allowed_elements()
            .map(str::to_string)
            .collect();
        allowed_elements.sort();
        Self {
            threads: default_thread_count(),
            min_heavy_atoms: 3,
            score_tie_epsilon: 1e-6,
            scoring: ScoringConfig::default(),
            allowed_elements,
            exclude_parent: true,
        }
    }
}
