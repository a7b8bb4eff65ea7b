use super::summary::{RerunCounts, RunSummary};
use crate::core::catalog::RuleCatalog;
use crate::core::models::ids::MoleculeIndex;
use crate::core::models::molecule::{InputRecord, ParentMolecule};
use crate::core::services::Collaborators;
use crate::engine::config::RunConfig;
use crate::engine::context::{PassKind, PredictionContext, SubModelPass};
use crate::engine::error::{EngineError, ErrorKind, ErrorRecord};
use crate::engine::pool::WorkerPool;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::PredictionStatus;
use crate::engine::store::{PredictionResults, ResultStore};
use crate::engine::worker::{self, PassOutcome, PassResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct PredictionRun {
    pub results: PredictionResults,
    pub summary: RunSummary,
}

#[instrument(skip_all, name = "prediction_workflow")]
pub fn run(
    inputs: &[InputRecord],
    catalog: &RuleCatalog,
    services: Collaborators,
    config: &RunConfig,
    reporter: &ProgressReporter,
) -> Result<PredictionRun, EngineError> {
    // === Phase 0: Preparation ===
    reporter.phase_start("Preparation");
    info!(
        inputs = inputs.len(),
        passes = config.sub_models.len(),
        threads = config.threads,
        "Starting prediction run."
    );

    config.validate_against(catalog)?;
    let context = PredictionContext::new(catalog, config, services, reporter);
    let parents = prepare_parents(inputs, &context)?;

    reporter.report(Progress::PhaseFinish);

    let store = ResultStore::new();

    // === Phase 1: One pass per sub-model, strictly in order ===
    for sub_model in &config.sub_models {
        let pass = context.resolve_pass(sub_model, PassKind::Main)?;
        run_pass(&parents, &pass, &context, &store)?;
    }

    // === Phase 2: Fallback rerun over failed sub-models ===
    let rerun = rerun_failed(&parents, &context, &store)?;

    // === Phase 3: Ranking ===
    rank_results(&context, &store)?;

    let results = store.into_results();
    let summary = RunSummary::collect(&results, rerun);
    info!("Prediction run complete: {}.", summary);
    Ok(PredictionRun { results, summary })
}

fn prepare_parents(
    inputs: &[InputRecord],
    context: &PredictionContext,
) -> Result<Vec<Arc<ParentMolecule>>, EngineError> {
    if inputs.is_empty() {
        return Err(EngineError::NoValidInput("the input batch is empty".to_string()));
    }

    let indexed: Vec<(MoleculeIndex, &InputRecord)> = inputs
        .iter()
        .enumerate()
        .map(|(i, record)| (MoleculeIndex(i), record))
        .collect();

    let pool = WorkerPool::new(context.config.threads, "prepare")?;
    let parents: Vec<Arc<ParentMolecule>> = pool.map(&indexed, |(index, record)| {
        Arc::new(ParentMolecule::prepare(
            *index,
            record,
            context.services.parser,
        ))
    });

    let parsed = parents.iter().filter(|p| p.is_parsed()).count();
    if parsed == 0 {
        return Err(EngineError::NoValidInput(format!(
            "none of the {} input record(s) could be parsed",
            inputs.len()
        )));
    }

    info!(
        parsed,
        unparsed = parents.len() - parsed,
        "Prepared parent molecules."
    );
    Ok(parents)
}

/// Runs one pass over `parents` and blocks until every outcome has been applied.
#[instrument(skip_all, name = "sub_model_pass", fields(sub_model = pass.sub_model))]
fn run_pass(
    parents: &[Arc<ParentMolecule>],
    pass: &SubModelPass,
    context: &PredictionContext,
    store: &ResultStore,
) -> Result<Vec<PredictionStatus>, EngineError> {
    let phase = match pass.kind {
        PassKind::Main => format!("Pass '{}'", pass.sub_model),
        PassKind::Rerun => format!("Rerun '{}'", pass.sub_model),
    };
    context.reporter.phase_start(phase);
    info!(
        molecules = parents.len(),
        rules = pass.rules.len(),
        "Starting pass."
    );
    if pass.rules.is_empty() {
        warn!("No rule of this sub-model is active under the phase filter.");
    }

    context.reporter.report(Progress::TaskStart {
        total_steps: parents.len() as u64,
    });

    let pool = WorkerPool::new(context.config.threads, &format!("pass-{}", pass.sub_model))?;
    let results = pool.try_map(parents, |parent| {
        let outcome = worker::predict(parent, pass, context);
        context.reporter.report(Progress::TaskIncrement);
        outcome
    });

    let outcomes: Vec<PassOutcome> = parents
        .iter()
        .zip(results)
        .map(|(parent, result)| {
            result.unwrap_or_else(|message| {
                error!(molecule = %parent.label(), "Worker panicked: {}", message);
                context.reporter.report(Progress::TaskIncrement);
                PassOutcome {
                    parent: Arc::clone(parent),
                    sub_model: pass.sub_model.to_string(),
                    result: PassResult::ModelFailed(ErrorRecord::new(
                        ErrorKind::SubModelFailed,
                        Some(pass.sub_model),
                        format!("worker panicked: {}", message),
                    )),
                }
            })
        })
        .collect();

    context.reporter.report(Progress::TaskFinish);

    let statuses: Vec<PredictionStatus> = outcomes
        .into_iter()
        .map(|outcome| {
            let index = outcome.index();
            let status = store.apply(outcome, pass.kind);
            debug!(molecule = %index, ?status, "Applied pass outcome.");
            status
        })
        .collect();

    let failed = statuses
        .iter()
        .filter(|s| matches!(s, PredictionStatus::ModelFailed | PredictionStatus::RerunFailed))
        .count();
    if failed > 0 {
        warn!(failed, "Sub-model could not annotate some molecules.");
    }

    context.reporter.report(Progress::PhaseFinish);
    Ok(statuses)
}

#[instrument(skip_all, name = "rerun_pass")]
fn rerun_failed(
    parents: &[Arc<ParentMolecule>],
    context: &PredictionContext,
    store: &ResultStore,
) -> Result<RerunCounts, EngineError> {
    let flagged = store.flagged();
    if flagged.is_empty() {
        debug!("No sub-model failures; skipping rerun.");
        return Ok(RerunCounts::default());
    }

    let Some(fallback) = context.config.fallback_sub_model.as_deref() else {
        warn!(
            flagged = flagged.len(),
            "Sub-model failures remain but no fallback sub-model is configured."
        );
        context.reporter.report(Progress::Message(format!(
            "{} molecule(s) failed a sub-model; no fallback sub-model is configured, skipping rerun",
            flagged.len()
        )));
        return Ok(RerunCounts::default());
    };

    let scheduled = store.schedule_reruns(&flagged);
    let targets: HashSet<MoleculeIndex> = flagged.into_iter().collect();
    let subset: Vec<Arc<ParentMolecule>> = parents
        .iter()
        .filter(|p| targets.contains(&p.index))
        .cloned()
        .collect();

    info!(scheduled, fallback, "Rerunning failed molecules with the fallback sub-model.");
    let pass = context.resolve_pass(fallback, PassKind::Rerun)?;
    let statuses = run_pass(&subset, &pass, context, store)?;

    let recovered = statuses
        .iter()
        .filter(|s| **s == PredictionStatus::RerunMerged)
        .count();
    info!(recovered, still_failed = scheduled - recovered, "Rerun finished.");

    Ok(RerunCounts {
        scheduled,
        recovered,
    })
}

fn rank_results(context: &PredictionContext, store: &ResultStore) -> Result<(), EngineError> {
    context.reporter.phase_start("Ranking");
    let pool = WorkerPool::new(context.config.threads, "rank")?;
    store.rank_all(
        &pool,
        context.config.score_tie_epsilon,
        context.config.max_ranked,
    );
    context.reporter.report(Progress::PhaseFinish);
    Ok(())
}
