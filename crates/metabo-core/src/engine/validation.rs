use super::config::RunConfig;
use super::error::{ErrorKind, ErrorRecord};
use crate::core::models::molecule::ParentMolecule;
use crate::core::models::structure::MolecularGraph;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRejection {
    pub kind: ErrorKind,
    pub detail: String,
}

impl InputRejection {
    fn new(kind: ErrorKind, detail: String) -> Self {
        Self { kind, detail }
    }

    pub fn into_record(self, sub_model: &str) -> ErrorRecord {
        ErrorRecord::new(self.kind, Some(sub_model), self.detail)
    }
}

/// Checks a parent in the fixed order: parsed, large enough, allowed atoms only, single
/// component. The first failing check decides the rejection kind.
pub fn validate<'p>(
    parent: &'p ParentMolecule,
    config: &RunConfig,
) -> Result<&'p MolecularGraph, InputRejection> {
    let Some(structure) = parent.structure() else {
        let reason = parent.parse_error().unwrap_or("structure could not be parsed");
        return Err(InputRejection::new(
            ErrorKind::InvalidInput,
            reason.to_string(),
        ));
    };

    let heavy_atoms = structure.heavy_atom_count();
    if heavy_atoms < config.min_heavy_atoms {
        return Err(InputRejection::new(
            ErrorKind::TooSmall,
            format!(
                "{} heavy atom(s), at least {} required",
                heavy_atoms, config.min_heavy_atoms
            ),
        ));
    }

    let unsupported: Vec<&str> = structure
        .symbols()
        .filter(|s| !config.is_element_allowed(s))
        .unique()
        .sorted()
        .collect();
    if !unsupported.is_empty() {
        return Err(InputRejection::new(
            ErrorKind::UnsupportedAtomType,
            format!("unsupported element(s): {}", unsupported.join(", ")),
        ));
    }

    let components = structure.component_count();
    if components > 1 {
        return Err(InputRejection::new(
            ErrorKind::Disconnected,
            format!("{} disconnected fragments", components),
        ));
    }

    Ok(structure)
}
