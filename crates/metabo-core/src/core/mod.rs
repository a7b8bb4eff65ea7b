//! # Core Module
//!
//! Fundamental building blocks shared by every stage of a prediction run.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Molecular graphs, parents, rules and candidates
//! - **Rule Catalog** ([`catalog`]) - Sub-model to rule mapping loaded once per run
//! - **Collaborator Ports** ([`services`]) - Parser, transform engine and identity service traits
//! - **File I/O** ([`io`]) - Run configuration files and their defaults

pub mod catalog;
pub mod io;
pub mod models;
pub mod services;
