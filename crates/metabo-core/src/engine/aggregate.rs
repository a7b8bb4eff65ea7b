use super::context::PassKind;
use super::error::{ErrorKind, ErrorRecord, ErrorSet};
use super::merger::{CandidateSet, MergeStats};
use super::ranker;
use super::state::PredictionStatus;
use super::worker::PassResult;
use crate::core::models::candidate::CandidateMetabolite;
use crate::core::models::molecule::ParentMolecule;
use std::sync::Arc;

/// Everything the run knows about one input molecule.
///
/// Created by the first pass outcome for its index and updated in place by every later
/// pass. Candidates are never added once an input-level error is recorded, and the
/// sub-model failure flag is only cleared by a successful rerun.
#[derive(Debug, Clone)]
pub struct PredictionAggregate {
    parent: Arc<ParentMolecule>,
    candidates: CandidateSet,
    errors: ErrorSet,
    ranked: Vec<CandidateMetabolite>,
    sub_model_failed: bool,
    status: PredictionStatus,
}

impl PredictionAggregate {
    pub fn new(parent: Arc<ParentMolecule>) -> Self {
        Self {
            parent,
            candidates: CandidateSet::new(),
            errors: ErrorSet::new(),
            ranked: Vec::new(),
            sub_model_failed: false,
            status: PredictionStatus::Validated,
        }
    }

    pub fn parent(&self) -> &ParentMolecule {
        &self.parent
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Ranked candidates; empty until the ranking pass has run.
    pub fn ranked(&self) -> &[CandidateMetabolite] {
        &self.ranked
    }

    pub fn sub_model_failed(&self) -> bool {
        self.sub_model_failed
    }

    pub fn status(&self) -> PredictionStatus {
        self.status
    }

    pub fn is_rejected(&self) -> bool {
        self.errors.has_input_level()
    }

    pub fn apply(&mut self, result: PassResult, kind: PassKind) -> PredictionStatus {
        match (kind, result) {
            (_, PassResult::Rejected(record)) => {
                self.errors.insert(record);
                if kind == PassKind::Rerun {
                    self.status = self.status.after_rerun(false);
                } else {
                    self.status = PredictionStatus::Rejected;
                }
            }
            (PassKind::Main, PassResult::ModelFailed(record)) => {
                self.errors.insert(record);
                self.sub_model_failed = true;
                self.status = self.status.after_model_failure();
            }
            (PassKind::Main, PassResult::Candidates(batch)) => {
                if self.merge(batch).is_some() {
                    self.status = self.status.after_merge();
                }
            }
            (PassKind::Rerun, PassResult::ModelFailed(record)) => {
                self.errors.insert(record);
                self.status = self.status.after_rerun(false);
            }
            (PassKind::Rerun, PassResult::Candidates(batch)) => {
                let merged = self.merge(batch).is_some();
                if merged {
                    self.sub_model_failed = false;
                    self.errors.remove(ErrorKind::SubModelFailed);
                }
                self.status = self.status.after_rerun(merged);
            }
        }
        self.status
    }

    pub fn schedule_rerun(&mut self) -> bool {
        if !self.sub_model_failed {
            return false;
        }
        self.status = PredictionStatus::RerunScheduled;
        true
    }

    pub fn finalize_ranking(&mut self, epsilon: f64, max_ranked: Option<usize>) {
        let mut ranked = ranker::rank(&self.candidates, epsilon);
        if let Some(limit) = max_ranked {
            ranked.truncate(limit);
        }
        self.ranked = ranked;
        self.status = PredictionStatus::Ranked;
    }

    fn merge(&mut self, batch: Vec<CandidateMetabolite>) -> Option<MergeStats> {
        if self.errors.has_input_level() {
            return None;
        }
        Some(self.candidates.merge(batch))
    }
}
