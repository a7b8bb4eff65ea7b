//! # Workflows Module
//!
//! High-level entry points that run a complete prediction batch.
//!
//! ## Overview
//!
//! [`predict::run`] takes the caller's input records, a loaded rule catalog, the collaborator
//! services and a validated [`RunConfig`](crate::engine::config::RunConfig). It parses every
//! input once, runs the configured sub-model passes one after another on a bounded worker
//! pool, reruns molecules whose sub-model failed with the fallback sub-model, ranks every
//! molecule's candidates and returns the per-molecule results with a [`summary::RunSummary`].
//!
//! Formatting and persisting the results is left to the caller.

pub mod predict;
pub mod summary;
