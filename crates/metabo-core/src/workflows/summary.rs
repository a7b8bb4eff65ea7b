use crate::engine::error::ErrorKind;
use crate::engine::store::PredictionResults;
use std::collections::BTreeMap;
use std::fmt;

/// Counts from the rerun pass, gathered while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RerunCounts {
    pub scheduled: usize,
    pub recovered: usize,
}

/// Batch-level counts handed back to the caller alongside the per-molecule results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    /// Molecules that finished without any error record.
    pub succeeded: usize,
    pub errored: usize,
    pub rerun_scheduled: usize,
    pub rerun_recovered: usize,
    /// Ranked candidates across all molecules.
    pub candidates: usize,
    pub errors_by_kind: BTreeMap<ErrorKind, usize>,
}

impl RunSummary {
    pub fn collect(results: &PredictionResults, rerun: RerunCounts) -> Self {
        let mut summary = Self {
            processed: results.len(),
            rerun_scheduled: rerun.scheduled,
            rerun_recovered: rerun.recovered,
            ..Self::default()
        };

        for aggregate in results.aggregates() {
            if aggregate.errors().is_empty() {
                summary.succeeded += 1;
            } else {
                summary.errored += 1;
            }
            summary.candidates += aggregate.ranked().len();
            for kind in aggregate.errors().kinds() {
                *summary.errors_by_kind.entry(kind).or_default() += 1;
            }
        }
        summary
    }

    pub fn errors_of(&self, kind: ErrorKind) -> usize {
        self.errors_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} succeeded, {} errored, {}/{} rerun recovered, {} candidates",
            self.processed,
            self.succeeded,
            self.errored,
            self.rerun_recovered,
            self.rerun_scheduled,
            self.candidates
        )?;
        if !self.errors_by_kind.is_empty() {
            let parts: Vec<String> = self
                .errors_by_kind
                .iter()
                .map(|(kind, count)| format!("{}={}", kind, count))
                .collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}
