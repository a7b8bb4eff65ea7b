//! The rule catalog: a read-only, process-wide mapping from sub-model name to its ordered
//! transformation rules, loaded once before a batch starts.

pub mod registry;

pub use registry::{CatalogLoadError, RuleCatalog};
