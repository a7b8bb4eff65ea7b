use super::ids::CanonicalKey;
use super::structure::MolecularGraph;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub rule: String,
    pub sub_model: String,
}

/// A predicted transformation product of a parent molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMetabolite {
    pub structure: MolecularGraph,
    pub key: CanonicalKey,
    pub score: f64,
    pub provenance: Provenance,
    /// Parent atom indices the producing rule reacted at.
    pub reacting_atoms: Vec<usize>,
    pub passed_cutoff: bool,
    pub rank: Option<usize>,
}

impl CandidateMetabolite {
    pub fn is_same_metabolite(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
