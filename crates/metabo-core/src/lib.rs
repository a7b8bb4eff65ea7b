//! # Metabo++ Core Library
//!
//! A rule-based engine that predicts candidate metabolites of small molecules by applying a
//! catalog of structural transformation rules, then merging, scoring and ranking the products.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularGraph`, `ParentMolecule`,
//!   `CandidateMetabolite`), the rule catalog, configuration files, and the ports through which
//!   the structure transform engine, canonical identity service and structure parser are
//!   plugged in.
//!
//! - **[`engine`]: The Logic Core.** Validation, scoring, the candidate merger and ranker, the
//!   per-molecule worker, and the concurrent result store that every pass writes into.
//!
//! - **[`workflows`]: The Public API.** The batch orchestrator that schedules passes over a
//!   bounded worker pool, reruns failed sub-models with a fallback, and ranks the results.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
