use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordinal priority attached to a rule by the catalog curators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RulePriority {
    Common,
    Uncommon,
}

/// Metabolic phase a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    PhaseOne,
    PhaseTwo,
    #[default]
    Any,
}

impl Phase {
    /// Whether a rule tagged with `self` is active under the given run filter.
    pub fn applies_under(self, filter: Option<Phase>) -> bool {
        match (self, filter) {
            (_, None) | (Phase::Any, _) | (_, Some(Phase::Any)) => true,
            (tag, Some(wanted)) => tag == wanted,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl FromStr for RulePriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            other => Err(ParseEnumError {
                kind: "rule priority",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Phase {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phase-one" | "phase1" | "1" => Ok(Self::PhaseOne),
            "phase-two" | "phase2" | "2" => Ok(Self::PhaseTwo),
            "any" => Ok(Self::Any),
            other => Err(ParseEnumError {
                kind: "phase",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RulePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Common => f.write_str("common"),
            Self::Uncommon => f.write_str("uncommon"),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhaseOne => f.write_str("phase-one"),
            Self::PhaseTwo => f.write_str("phase-two"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A named structural transformation owned by one sub-model.
///
/// `pattern` is opaque to this crate and only interpreted by the transform engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransformationRule {
    pub name: String,
    pub sub_model: String,
    pub priority: RulePriority,
    pub phase: Phase,
    pub pattern: String,
}

impl TransformationRule {
    pub fn new(name: &str, sub_model: &str, priority: RulePriority, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            sub_model: sub_model.to_string(),
            priority,
            phase: Phase::Any,
            pattern: pattern.to_string(),
        }
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }
}
