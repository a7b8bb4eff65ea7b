/// Where a molecule stands in the run-wide prediction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionStatus {
    Validated,
    Rejected,
    CandidatesMerged,
    ModelFailed,
    RerunScheduled,
    RerunMerged,
    RerunFailed,
    Ranked,
}

impl PredictionStatus {
    /// Status after a main pass produced a batch of candidates. A molecule rejected or failed
    /// in an earlier pass keeps that status.
    pub fn after_merge(self) -> Self {
        match self {
            Self::Validated | Self::CandidatesMerged => Self::CandidatesMerged,
            other => other,
        }
    }

    pub fn after_model_failure(self) -> Self {
        match self {
            Self::Rejected => Self::Rejected,
            _ => Self::ModelFailed,
        }
    }

    pub fn after_rerun(self, succeeded: bool) -> Self {
        match (self, succeeded) {
            (Self::RerunScheduled, true) => Self::RerunMerged,
            (Self::RerunScheduled, false) => Self::RerunFailed,
            (other, _) => other,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_does_not_mask_earlier_failures() {
        assert_eq!(
            PredictionStatus::Validated.after_merge(),
            PredictionStatus::CandidatesMerged
        );
        assert_eq!(
            PredictionStatus::ModelFailed.after_merge(),
            PredictionStatus::ModelFailed
        );
        assert_eq!(
            PredictionStatus::Rejected.after_merge(),
            PredictionStatus::Rejected
        );
    }

    #[test]
    fn model_failure_overrides_merged_but_not_rejected() {
        assert_eq!(
            PredictionStatus::CandidatesMerged.after_model_failure(),
            PredictionStatus::ModelFailed
        );
        assert_eq!(
            PredictionStatus::Rejected.after_model_failure(),
            PredictionStatus::Rejected
        );
    }

    #[test]
    fn rerun_outcome_applies_only_to_scheduled_molecules() {
        assert_eq!(
            PredictionStatus::RerunScheduled.after_rerun(true),
            PredictionStatus::RerunMerged
        );
        assert_eq!(
            PredictionStatus::RerunScheduled.after_rerun(false),
            PredictionStatus::RerunFailed
        );
        assert_eq!(
            PredictionStatus::CandidatesMerged.after_rerun(true),
            PredictionStatus::CandidatesMerged
        );
        assert!(PredictionStatus::Ranked.is_terminal());
        assert!(!PredictionStatus::RerunMerged.is_terminal());
    }
}
