//! Ports to the collaborators that sit outside the prediction engine.
//!
//! Implementations must be reentrant: every method may be called concurrently from several
//! worker threads during a pass.

use crate::core::models::ids::CanonicalKey;
use crate::core::models::rule::TransformationRule;
use crate::core::models::structure::MolecularGraph;

/// A product structure returned by the transform engine for one rule application.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    pub structure: MolecularGraph,
    /// Indices of the parent atoms at which the rule reacted.
    pub reacting_atoms: Vec<usize>,
}

impl RawCandidate {
    pub fn new(structure: MolecularGraph, reacting_atoms: Vec<usize>) -> Self {
        Self {
            structure,
            reacting_atoms,
        }
    }
}

/// Turns a source representation (e.g. a line notation) into a molecular graph.
pub trait StructureParser: Send + Sync {
    fn parse(&self, source: &str) -> Result<MolecularGraph, String>;
}

/// Rewrites a parent structure according to one transformation rule.
///
/// An `Err` fails the current sub-model for this parent only; the rest of the pass goes on.
pub trait TransformEngine: Send + Sync {
    fn apply(
        &self,
        parent: &MolecularGraph,
        rule: &TransformationRule,
    ) -> Result<Vec<RawCandidate>, String>;

    /// Whether every reactive atom of `parent` carries an annotation usable by `sub_model`.
    fn all_atoms_annotated(&self, parent: &MolecularGraph, sub_model: &str) -> bool;
}

/// Computes the deterministic, stereochemistry-insensitive identity of a structure.
pub trait IdentityService: Send + Sync {
    fn identity(&self, structure: &MolecularGraph) -> Result<CanonicalKey, String>;
}

/// The set of collaborators a prediction run is wired to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub parser: &'a dyn StructureParser,
    pub engine: &'a dyn TransformEngine,
    pub identity: &'a dyn IdentityService,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        parser: &'a dyn StructureParser,
        engine: &'a dyn TransformEngine,
        identity: &'a dyn IdentityService,
    ) -> Self {
        Self {
            parser,
            engine,
            identity,
        }
    }
}
