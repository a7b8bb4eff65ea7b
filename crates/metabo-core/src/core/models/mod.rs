//! Data structures describing parent molecules, transformation rules and the candidate
//! metabolites produced from them.
//!
//! - [`ids`] - Molecule indices and canonical identity keys
//! - [`element`] - Element table and the default atom allow-list
//! - [`structure`] - The molecular graph exchanged with external collaborators
//! - [`molecule`] - Input records and prepared parent molecules
//! - [`rule`] - Transformation rules, priorities and phases
//! - [`candidate`] - Candidate metabolites and their provenance

pub mod candidate;
pub mod element;
pub mod ids;
pub mod molecule;
pub mod rule;
pub mod structure;
