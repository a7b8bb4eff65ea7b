//! Deterministic collaborator doubles shared by the unit tests.

use crate::core::models::ids::CanonicalKey;
use crate::core::models::rule::TransformationRule;
use crate::core::models::structure::{Atom, BondOrder, MolecularGraph};
use crate::core::services::{IdentityService, RawCandidate, StructureParser, TransformEngine};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// Builds a linear chain of atoms from `(symbol, implicit H, reactivity)` triples.
pub fn chain(atoms: &[(&str, u8, Option<f64>)]) -> MolecularGraph {
    let mut graph = MolecularGraph::new();
    for (i, (symbol, hydrogens, reactivity)) in atoms.iter().enumerate() {
        let mut atom = Atom::new(symbol).with_hydrogens(*hydrogens);
        atom.reactivity = *reactivity;
        graph.add_atom(atom);
        if i > 0 {
            graph.add_bond(i - 1, i, BondOrder::Single);
        }
    }
    graph
}

/// Looks structures up by their exact source text.
#[derive(Default)]
pub struct TableParser {
    table: HashMap<String, MolecularGraph>,
}

impl TableParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: &str, graph: MolecularGraph) -> Self {
        self.table.insert(source.to_string(), graph);
        self
    }

    pub fn standard() -> Self {
        let mut salt = chain(&[("C", 3, Some(0.3)), ("C", 2, Some(0.6)), ("O", 0, Some(0.2))]);
        salt.atom_mut(2).unwrap().charge = -1;
        salt.add_atom(Atom::new("Na").with_charge(1));

        Self::new()
            .with("CCO", chain(&[("C", 3, Some(0.2)), ("C", 2, Some(0.5)), ("O", 1, Some(0.7))]))
            .with("CCCN", chain(&[("C", 3, Some(0.1)), ("C", 2, Some(0.4)), ("C", 2, Some(0.3)), ("N", 2, Some(0.9))]))
            .with("CC", chain(&[("C", 3, Some(0.5)), ("C", 3, Some(0.5))]))
            .with("CC[Si]", chain(&[("C", 3, Some(0.5)), ("C", 2, Some(0.5)), ("Si", 3, Some(0.1))]))
            .with("CCO.[Na+]", salt)
            .with("CCCO", chain(&[("C", 3, None), ("C", 2, Some(0.4)), ("C", 2, Some(0.3)), ("O", 1, Some(0.8))]))
    }
}

impl StructureParser for TableParser {
    fn parse(&self, source: &str) -> Result<MolecularGraph, String> {
        self.table
            .get(source)
            .cloned()
            .ok_or_else(|| format!("Unrecognized structure '{}'", source))
    }
}

/// Interprets a rule pattern `SYMBOL@SITE` as "attach one SYMBOL atom to parent atom SITE",
/// consuming one implicit hydrogen. `SYMBOL@*` attaches at every heavy atom carrying a hydrogen.
/// The pattern `noop` returns the parent unchanged.
#[derive(Default)]
pub struct AttachEngine {
    lenient_sub_models: HashSet<String>,
}

impl AttachEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-models that do not require per-atom reactivity annotations.
    pub fn lenient(mut self, sub_model: &str) -> Self {
        self.lenient_sub_models.insert(sub_model.to_string());
        self
    }

    fn attach(parent: &MolecularGraph, symbol: &str, site: usize) -> Option<RawCandidate> {
        let target = parent.atom(site)?;
        if !target.is_heavy() || target.implicit_hydrogens == 0 {
            return None;
        }
        let mut product = parent.clone();
        if let Some(atom) = product.atom_mut(site) {
            atom.implicit_hydrogens -= 1;
        }
        let added = product.add_atom(Atom::new(symbol).with_hydrogens(1));
        product.add_bond(site, added, BondOrder::Single);
        Some(RawCandidate::new(product, vec![site]))
    }
}

impl TransformEngine for AttachEngine {
    fn apply(
        &self,
        parent: &MolecularGraph,
        rule: &TransformationRule,
    ) -> Result<Vec<RawCandidate>, String> {
        if rule.pattern == "noop" {
            return Ok(vec![RawCandidate::new(parent.clone(), Vec::new())]);
        }
        let Some((symbol, site)) = rule.pattern.split_once('@') else {
            return Ok(Vec::new());
        };
        if site == "*" {
            return Ok((0..parent.atom_count())
                .filter_map(|i| Self::attach(parent, symbol, i))
                .collect());
        }
        Ok(site
            .parse::<usize>()
            .ok()
            .and_then(|i| Self::attach(parent, symbol, i))
            .into_iter()
            .collect())
    }

    fn all_atoms_annotated(&self, parent: &MolecularGraph, sub_model: &str) -> bool {
        self.lenient_sub_models.contains(sub_model)
            || parent
                .atoms()
                .iter()
                .filter(|a| a.is_heavy())
                .all(|a| a.reactivity.is_some())
    }
}

/// Wraps an engine and records which sub-models each parent was checked against.
pub struct RecordingEngine<E> {
    inner: E,
    pub annotation_checks: Mutex<Vec<(usize, String)>>,
}

impl<E> RecordingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            annotation_checks: Mutex::new(Vec::new()),
        }
    }

    pub fn checks_for(&self, sub_model: &str) -> Vec<usize> {
        let mut atoms: Vec<_> = self
            .annotation_checks
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, name)| name == sub_model)
            .map(|(count, _)| *count)
            .collect();
        atoms.sort_unstable();
        atoms
    }
}

impl<E: TransformEngine> TransformEngine for RecordingEngine<E> {
    fn apply(
        &self,
        parent: &MolecularGraph,
        rule: &TransformationRule,
    ) -> Result<Vec<RawCandidate>, String> {
        self.inner.apply(parent, rule)
    }

    fn all_atoms_annotated(&self, parent: &MolecularGraph, sub_model: &str) -> bool {
        self.annotation_checks
            .lock()
            .unwrap()
            .push((parent.atom_count(), sub_model.to_string()));
        self.inner.all_atoms_annotated(parent, sub_model)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Error,
    Panic,
}

/// Wraps an engine and makes `apply` misbehave for parents with a given atom count.
pub struct FaultyEngine<E> {
    inner: E,
    atom_count: usize,
    fault: Fault,
}

impl<E> FaultyEngine<E> {
    pub fn new(inner: E, atom_count: usize, fault: Fault) -> Self {
        Self {
            inner,
            atom_count,
            fault,
        }
    }
}

impl<E: TransformEngine> TransformEngine for FaultyEngine<E> {
    fn apply(
        &self,
        parent: &MolecularGraph,
        rule: &TransformationRule,
    ) -> Result<Vec<RawCandidate>, String> {
        if parent.atom_count() != self.atom_count {
            return self.inner.apply(parent, rule);
        }
        match self.fault {
            Fault::Error => Err("kekulization failed".to_string()),
            Fault::Panic => panic!("engine crashed on rule '{}'", rule.name),
        }
    }

    fn all_atoms_annotated(&self, parent: &MolecularGraph, sub_model: &str) -> bool {
        self.inner.all_atoms_annotated(parent, sub_model)
    }
}

/// Identity by molecular formula: insensitive to atom order, so attaching the same group at
/// different sites yields the same key.
pub struct FormulaIdentity;

impl IdentityService for FormulaIdentity {
    fn identity(&self, structure: &MolecularGraph) -> Result<CanonicalKey, String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for atom in structure.atoms() {
            *counts.entry(atom.symbol.as_str()).or_default() += 1;
            if atom.implicit_hydrogens > 0 {
                *counts.entry("H").or_default() += usize::from(atom.implicit_hydrogens);
            }
        }
        let formula: String = counts
            .iter()
            .map(|(symbol, count)| format!("{}{}", symbol, count))
            .collect();
        Ok(CanonicalKey::new(formula))
    }
}
