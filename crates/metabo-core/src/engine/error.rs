use super::config::ConfigError;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// The closed set of conditions a prediction run can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    InvalidInput,
    TooSmall,
    UnsupportedAtomType,
    Disconnected,
    SubModelFailed,
    NoValidInput,
}

impl ErrorKind {
    /// Input-level kinds fail identically in every pass and preclude candidate generation.
    pub fn is_input_level(self) -> bool {
        match self {
            Self::InvalidInput | Self::TooSmall | Self::UnsupportedAtomType | Self::Disconnected => {
                true
            }
            Self::SubModelFailed | Self::NoValidInput => false,
        }
    }

    /// Only a failed sub-model makes a molecule eligible for the rerun pass.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::SubModelFailed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid-input",
            Self::TooSmall => "too-small",
            Self::UnsupportedAtomType => "unsupported-atom-type",
            Self::Disconnected => "disconnected",
            Self::SubModelFailed => "sub-model-failed",
            Self::NoValidInput => "no-valid-input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    /// Sub-model pass during which the error was observed.
    pub sub_model: Option<String>,
    pub detail: String,
}

impl ErrorRecord {
    pub fn new(kind: ErrorKind, sub_model: Option<&str>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            sub_model: sub_model.map(str::to_string),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_model {
            Some(sub_model) => write!(f, "[{}] {} ({})", self.kind, self.detail, sub_model),
            None => write!(f, "[{}] {}", self.kind, self.detail),
        }
    }
}

/// Error records of one molecule in the order they were observed, at most one per kind and
/// sub-model. The first record of a pair wins; later passes reporting the same kind keep their
/// own provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    records: Vec<ErrorRecord>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no record with the same kind and sub-model was present before.
    pub fn insert(&mut self, record: ErrorRecord) -> bool {
        let duplicate = self
            .records
            .iter()
            .any(|r| r.kind == record.kind && r.sub_model == record.sub_model);
        if !duplicate {
            self.records.push(record);
        }
        !duplicate
    }

    /// Drops every record of `kind` and returns how many there were.
    pub fn remove(&mut self, kind: ErrorKind) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.kind != kind);
        before - self.records.len()
    }

    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.records.iter().any(|r| r.kind == kind)
    }

    /// The earliest record of `kind`.
    pub fn get(&self, kind: ErrorKind) -> Option<&ErrorRecord> {
        self.records.iter().find(|r| r.kind == kind)
    }

    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn has_input_level(&self) -> bool {
        self.records.iter().any(|r| r.kind.is_input_level())
    }

    /// Distinct kinds, in `ErrorKind` order.
    pub fn kinds(&self) -> impl Iterator<Item = ErrorKind> + '_ {
        self.records.iter().map(|r| r.kind).sorted().dedup()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No valid input molecules: {0}")]
    NoValidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sub-model '{0}' is not defined in the rule catalog")]
    UnknownSubModel(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl EngineError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NoValidInput(_) => Some(ErrorKind::NoValidInput),
            _ => None,
        }
    }
}
