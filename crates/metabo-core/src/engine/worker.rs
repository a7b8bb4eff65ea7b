use super::context::{PredictionContext, SubModelPass};
use super::error::{ErrorKind, ErrorRecord};
use super::merger::CandidateSet;
use super::scoring;
use super::validation::validate;
use crate::core::models::candidate::{CandidateMetabolite, Provenance};
use crate::core::models::ids::MoleculeIndex;
use crate::core::models::molecule::ParentMolecule;
use crate::core::models::structure::MolecularGraph;
use std::sync::Arc;
use tracing::{debug, warn};

/// What one worker produced for one molecule in one pass.
#[derive(Debug, Clone)]
pub enum PassResult {
    /// The molecule failed input validation; terminal for every pass.
    Rejected(ErrorRecord),
    /// The sub-model could not be applied to the molecule: missing annotations or a
    /// collaborator error.
    ModelFailed(ErrorRecord),
    /// De-duplicated candidates, possibly none.
    Candidates(Vec<CandidateMetabolite>),
}

#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub parent: Arc<ParentMolecule>,
    pub sub_model: String,
    pub result: PassResult,
}

impl PassOutcome {
    pub fn index(&self) -> MoleculeIndex {
        self.parent.index
    }
}

/// Runs one sub-model over one parent. Pure with respect to shared state: the outcome is
/// returned to the scheduler, which owns the write into the result store.
pub fn predict(
    parent: &Arc<ParentMolecule>,
    pass: &SubModelPass<'_>,
    context: &PredictionContext<'_>,
) -> PassOutcome {
    let result = match validate(parent, context.config) {
        Ok(structure) => generate(structure, pass, context),
        Err(rejection) => {
            warn!(
                molecule = %parent.label(),
                kind = %rejection.kind,
                "Rejected input: {}",
                rejection.detail
            );
            PassResult::Rejected(rejection.into_record(pass.sub_model))
        }
    };

    PassOutcome {
        parent: Arc::clone(parent),
        sub_model: pass.sub_model.to_string(),
        result,
    }
}

fn generate(
    structure: &MolecularGraph,
    pass: &SubModelPass<'_>,
    context: &PredictionContext<'_>,
) -> PassResult {
    let services = context.services;

    if !services.engine.all_atoms_annotated(structure, pass.sub_model) {
        return PassResult::ModelFailed(ErrorRecord::new(
            ErrorKind::SubModelFailed,
            Some(pass.sub_model),
            "reaction likelihoods could not be assigned to every atom",
        ));
    }

    match collect_candidates(structure, pass, context) {
        Ok(batch) => PassResult::Candidates(batch.into_vec()),
        Err(detail) => {
            warn!(sub_model = pass.sub_model, "Collaborator failed: {}", detail);
            PassResult::ModelFailed(ErrorRecord::new(
                ErrorKind::SubModelFailed,
                Some(pass.sub_model),
                detail,
            ))
        }
    }
}

fn collect_candidates(
    structure: &MolecularGraph,
    pass: &SubModelPass<'_>,
    context: &PredictionContext<'_>,
) -> Result<CandidateSet, String> {
    let services = context.services;
    let parent_key = if context.config.exclude_parent {
        let key = services
            .identity
            .identity(structure)
            .map_err(|e| format!("identity of the parent could not be computed: {}", e))?;
        Some(key)
    } else {
        None
    };

    let mut batch = CandidateSet::new();
    let mut dropped = 0usize;
    for rule in &pass.rules {
        let products = services
            .engine
            .apply(structure, rule)
            .map_err(|e| format!("transform engine failed on rule '{}': {}", rule.name, e))?;
        for raw in products {
            let key = services.identity.identity(&raw.structure).map_err(|e| {
                format!("identity of a product of rule '{}' failed: {}", rule.name, e)
            })?;
            if parent_key.as_ref() == Some(&key) {
                dropped += 1;
                continue;
            }
            let score = scoring::score(
                structure,
                rule,
                &raw.reacting_atoms,
                &context.config.scoring,
            );
            batch.merge_candidate(CandidateMetabolite {
                structure: raw.structure,
                key,
                score: score.value,
                provenance: Provenance {
                    rule: rule.name.clone(),
                    sub_model: pass.sub_model.to_string(),
                },
                reacting_atoms: raw.reacting_atoms,
                passed_cutoff: score.passed_cutoff,
                rank: None,
            });
        }
    }

    debug!(
        sub_model = pass.sub_model,
        rules = pass.rules.len(),
        candidates = batch.len(),
        dropped_as_parent = dropped,
        "Generated candidate batch."
    );
    Ok(batch)
}
