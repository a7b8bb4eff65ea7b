use std::fmt;

/// Sequential position of a molecule in the caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MoleculeIndex(pub usize);

impl MoleculeIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for MoleculeIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for MoleculeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stereochemistry-insensitive identity of a structure. Two candidates are the same
/// metabolite iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CanonicalKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_index_orders_by_position() {
        assert!(MoleculeIndex(1) < MoleculeIndex(2));
        assert_eq!(MoleculeIndex::from(7).get(), 7);
        assert_eq!(MoleculeIndex(3).to_string(), "#3");
    }

    #[test]
    fn canonical_keys_compare_by_content() {
        assert_eq!(CanonicalKey::new("CCO"), CanonicalKey::from("CCO"));
        assert_ne!(CanonicalKey::new("CCO"), CanonicalKey::new("OCC"));
        assert_eq!(CanonicalKey::new("CCO").as_str(), "CCO");
    }
}
