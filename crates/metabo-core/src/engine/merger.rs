use crate::core::models::candidate::CandidateMetabolite;
use crate::core::models::ids::CanonicalKey;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Kept,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
    pub kept: usize,
}

impl MergeStats {
    fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Replaced => self.replaced += 1,
            MergeOutcome::Kept => self.kept += 1,
        }
    }

    pub fn changed(&self) -> bool {
        self.inserted + self.replaced > 0
    }
}

/// Candidates of one molecule keyed by canonical identity; a key occurs at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: BTreeMap<CanonicalKey, CandidateMetabolite>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<&CandidateMetabolite> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateMetabolite> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<CandidateMetabolite> {
        self.entries.into_values().collect()
    }

    /// Inserts `candidate` unless an entry with the same identity already has a score at
    /// least as high. Equal scores keep the existing entry.
    pub fn merge_candidate(&mut self, candidate: CandidateMetabolite) -> MergeOutcome {
        match self.entries.entry(candidate.key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                MergeOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                if candidate.score > slot.get().score {
                    slot.insert(candidate);
                    MergeOutcome::Replaced
                } else {
                    MergeOutcome::Kept
                }
            }
        }
    }

    pub fn merge(&mut self, batch: impl IntoIterator<Item = CandidateMetabolite>) -> MergeStats {
        let mut stats = MergeStats::default();
        for candidate in batch {
            stats.record(self.merge_candidate(candidate));
        }
        stats
    }
}

impl FromIterator<CandidateMetabolite> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = CandidateMetabolite>>(iter: T) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}
