use crate::core::models::rule::{Phase, RulePriority, TransformationRule};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RawRule {
    name: String,
    pattern: String,
    priority: RulePriority,
    #[serde(default)]
    phase: Phase,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RawSubModel {
    rules: Vec<RawRule>,
}

type RawCatalogFile = HashMap<String, RawSubModel>;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
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
    #[error("Rule '{rule}' is defined more than once in sub-model '{sub_model}'")]
    DuplicateRule { sub_model: String, rule: String },
    #[error("Sub-model '{0}' does not define any rules")]
    EmptySubModel(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCatalog {
    sub_models: BTreeMap<String, Vec<TransformationRule>>,
}

impl RuleCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: RawCatalogFile = toml::from_str(&content).map_err(|e| CatalogLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut rules = Vec::new();
        for (sub_model, raw_sub_model) in raw {
            if raw_sub_model.rules.is_empty() {
                return Err(CatalogLoadError::EmptySubModel(sub_model));
            }
            rules.extend(raw_sub_model.rules.into_iter().map(|r| TransformationRule {
                name: r.name,
                sub_model: sub_model.clone(),
                priority: r.priority,
                phase: r.phase,
                pattern: r.pattern,
            }));
        }

        let catalog = Self::from_rules(rules)?;
        debug!(
            sub_models = catalog.sub_models.len(),
            rules = catalog.rule_count(),
            "Rule catalog loaded."
        );
        Ok(catalog)
    }

    /// Groups rules by their owning sub-model, keeping their relative order.
    pub fn from_rules(
        rules: impl IntoIterator<Item = TransformationRule>,
    ) -> Result<Self, CatalogLoadError> {
        let mut sub_models: BTreeMap<String, Vec<TransformationRule>> = BTreeMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for rule in rules {
            if !seen.insert((rule.sub_model.clone(), rule.name.clone())) {
                return Err(CatalogLoadError::DuplicateRule {
                    sub_model: rule.sub_model,
                    rule: rule.name,
                });
            }
            sub_models.entry(rule.sub_model.clone()).or_default().push(rule);
        }
        Ok(Self { sub_models })
    }

    pub fn rules_for(&self, sub_model: &str) -> Option<&[TransformationRule]> {
        self.sub_models.get(sub_model).map(Vec::as_slice)
    }

    /// Rules of `sub_model` active under the given phase filter, in catalog order.
    pub fn active_rules(
        &self,
        sub_model: &str,
        phase_filter: Option<Phase>,
    ) -> Option<Vec<&TransformationRule>> {
        self.rules_for(sub_model).map(|rules| {
            rules
                .iter()
                .filter(|r| r.phase.applies_under(phase_filter))
                .collect()
        })
    }

    pub fn contains(&self, sub_model: &str) -> bool {
        self.sub_models.contains_key(sub_model)
    }

    pub fn sub_model_names(&self) -> impl Iterator<Item = &str> {
        self.sub_models.keys().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.sub_models.values().map(Vec::len).sum()
    }
}
