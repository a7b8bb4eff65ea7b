use super::config::RunConfig;
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::catalog::RuleCatalog;
use crate::core::models::rule::TransformationRule;
use crate::core::services::Collaborators;

/// Which scheduling round a pass belongs to. Outcomes of a rerun pass resolve the
/// sub-model failure flag instead of merging like a regular pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Main,
    Rerun,
}

#[derive(Clone, Copy)]
pub struct PredictionContext<'a> {
    pub catalog: &'a RuleCatalog,
    pub config: &'a RunConfig,
    pub services: Collaborators<'a>,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> PredictionContext<'a> {
    pub fn new(
        catalog: &'a RuleCatalog,
        config: &'a RunConfig,
        services: Collaborators<'a>,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            catalog,
            config,
            services,
            reporter,
        }
    }

    /// Resolves the rules a pass over `sub_model` applies, honouring the configured phase filter.
    pub fn resolve_pass(
        &self,
        sub_model: &'a str,
        kind: PassKind,
    ) -> Result<SubModelPass<'a>, EngineError> {
        let rules = self
            .catalog
            .active_rules(sub_model, self.config.phase_filter)
            .ok_or_else(|| EngineError::UnknownSubModel(sub_model.to_string()))?;
        Ok(SubModelPass {
            sub_model,
            rules,
            kind,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SubModelPass<'a> {
    pub sub_model: &'a str,
    pub rules: Vec<&'a TransformationRule>,
    pub kind: PassKind,
}
