use super::ids::MoleculeIndex;
use super::structure::MolecularGraph;
use crate::core::services::StructureParser;

/// One raw input item as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub name: Option<String>,
    pub source: String,
}

impl InputRecord {
    pub fn new(source: &str) -> Self {
        Self {
            name: None,
            source: source.to_string(),
        }
    }

    pub fn named(name: &str, source: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            source: source.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptors {
    pub molecular_weight: Option<f64>,
    pub heavy_atom_count: usize,
}

impl Descriptors {
    pub fn of(structure: &MolecularGraph) -> Self {
        Self {
            molecular_weight: structure.molecular_weight(),
            heavy_atom_count: structure.heavy_atom_count(),
        }
    }
}

/// A parent molecule prepared once per input item and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentMolecule {
    pub index: MoleculeIndex,
    pub name: Option<String>,
    /// Snapshot of the original input text.
    pub source: String,
    structure: Option<MolecularGraph>,
    parse_error: Option<String>,
    descriptors: Option<Descriptors>,
}

impl ParentMolecule {
    pub fn prepare(index: MoleculeIndex, record: &InputRecord, parser: &dyn StructureParser) -> Self {
        let (structure, parse_error) = match parser.parse(&record.source) {
            Ok(graph) => (Some(graph), None),
            Err(reason) => (None, Some(reason)),
        };
        let descriptors = structure.as_ref().map(Descriptors::of);
        Self {
            index,
            name: record.name.clone(),
            source: record.source.clone(),
            structure,
            parse_error,
            descriptors,
        }
    }

    pub fn from_structure(index: MoleculeIndex, name: Option<&str>, structure: MolecularGraph) -> Self {
        let descriptors = Some(Descriptors::of(&structure));
        Self {
            index,
            name: name.map(str::to_string),
            source: String::new(),
            structure: Some(structure),
            parse_error: None,
            descriptors,
        }
    }

    pub fn structure(&self) -> Option<&MolecularGraph> {
        self.structure.as_ref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn descriptors(&self) -> Option<&Descriptors> {
        self.descriptors.as_ref()
    }

    pub fn is_parsed(&self) -> bool {
        self.structure.is_some()
    }

    /// Name used in log output: the external name if present, otherwise the index.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.index),
            None => self.index.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TableParser;

    #[test]
    fn prepare_parses_and_computes_descriptors() {
        let parser = TableParser::standard();
        let parent = ParentMolecule::prepare(
            MoleculeIndex(0),
            &InputRecord::named("ethanol", "CCO"),
            &parser,
        );

        assert!(parent.is_parsed());
        assert!(parent.parse_error().is_none());
        assert_eq!(parent.source, "CCO");
        let descriptors = parent.descriptors().unwrap();
        assert_eq!(descriptors.heavy_atom_count, 3);
        assert!(descriptors.molecular_weight.unwrap() > 46.0);
        assert_eq!(parent.label(), "ethanol (#0)");
    }

    #[test]
    fn prepare_keeps_the_parse_failure() {
        let parser = TableParser::standard();
        let parent = ParentMolecule::prepare(MoleculeIndex(4), &InputRecord::new("not-a-molecule"), &parser);

        assert!(!parent.is_parsed());
        assert!(parent.structure().is_none());
        assert!(parent.descriptors().is_none());
        assert!(parent.parse_error().unwrap().contains("not-a-molecule"));
        assert_eq!(parent.label(), "#4");
    }
}
