use super::aggregate::PredictionAggregate;
use super::context::PassKind;
use super::pool::WorkerPool;
use super::state::PredictionStatus;
use super::worker::PassOutcome;
use crate::core::models::ids::MoleculeIndex;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Concurrent map from molecule index to its aggregate, owned by one run.
///
/// Each pass writes every key at most once. Passes are separated by the pool barrier, so
/// map-level synchronisation is all that is needed.
#[derive(Debug, Default)]
pub struct ResultStore {
    aggregates: DashMap<MoleculeIndex, PredictionAggregate>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, outcome: PassOutcome, kind: PassKind) -> PredictionStatus {
        let PassOutcome { parent, result, .. } = outcome;
        let mut aggregate = self
            .aggregates
            .entry(parent.index)
            .or_insert_with(|| PredictionAggregate::new(Arc::clone(&parent)));
        aggregate.apply(result, kind)
    }

    pub fn flagged(&self) -> Vec<MoleculeIndex> {
        let mut flagged: Vec<_> = self
            .aggregates
            .iter()
            .filter(|entry| entry.value().sub_model_failed())
            .map(|entry| *entry.key())
            .collect();
        flagged.sort_unstable();
        flagged
    }

    pub fn schedule_reruns(&self, indices: &[MoleculeIndex]) -> usize {
        indices
            .iter()
            .filter(|index| {
                self.aggregates
                    .get_mut(*index)
                    .is_some_and(|mut aggregate| aggregate.schedule_rerun())
            })
            .count()
    }

    pub fn rank_all(&self, pool: &WorkerPool, epsilon: f64, max_ranked: Option<usize>) {
        let indices: Vec<MoleculeIndex> = self.aggregates.iter().map(|e| *e.key()).collect();
        pool.map(&indices, |index| {
            if let Some(mut aggregate) = self.aggregates.get_mut(index) {
                aggregate.finalize_ranking(epsilon, max_ranked);
            }
        });
    }

    pub fn snapshot(&self, index: MoleculeIndex) -> Option<PredictionAggregate> {
        self.aggregates.get(&index).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }

    pub fn into_results(self) -> PredictionResults {
        PredictionResults {
            aggregates: self.aggregates.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PredictionResults {
    aggregates: BTreeMap<MoleculeIndex, PredictionAggregate>,
}

impl PredictionResults {
    pub fn get(&self, index: MoleculeIndex) -> Option<&PredictionAggregate> {
        self.aggregates.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MoleculeIndex, &PredictionAggregate)> {
        self.aggregates.iter()
    }

    pub fn aggregates(&self) -> impl Iterator<Item = &PredictionAggregate> {
        self.aggregates.values()
    }

    pub fn len(&self) -> usize {
        self.aggregates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregates.is_empty()
    }
}

impl IntoIterator for PredictionResults {
    type Item = (MoleculeIndex, PredictionAggregate);
    type IntoIter = std::collections::btree_map::IntoIter<MoleculeIndex, PredictionAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.aggregates.into_iter()
    }
}
