//! # Engine Module
//!
//! The stateful prediction machinery behind a batch run.
//!
//! ## Overview
//!
//! A run is a sequence of passes, one per configured sub-model. Within a pass every parent
//! molecule is handed to a worker on a bounded pool. Workers validate the parent, apply the
//! sub-model's rules through the transform engine, score and de-duplicate the products, and
//! return a [`worker::PassOutcome`]. The scheduler then folds each outcome into the
//! [`store::ResultStore`], where the per-molecule [`aggregate::PredictionAggregate`] lives for
//! the whole run.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters, scoring weights and their builder
//! - **Error Handling** ([`error`]) - Per-molecule error kinds and run-level failures
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Validation and Scoring** ([`validation`], [`scoring`]) - Input checks and priority scores
//! - **Merging and Ranking** ([`merger`], [`ranker`]) - Identity-keyed dedup and tie-aware ranks
//! - **Execution** ([`worker`], [`pool`], [`store`]) - Per-molecule tasks, the bounded pool and
//!   the concurrent result store
//! - **State Tracking** ([`state`], [`aggregate`]) - Per-molecule lifecycle and results

pub mod aggregate;
pub mod config;
pub mod context;
pub mod error;
pub mod merger;
pub mod pool;
pub mod progress;
pub mod ranker;
pub mod scoring;
pub mod state;
pub mod store;
pub mod validation;
pub mod worker;
