use super::element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub implicit_hydrogens: u8,
    pub charge: i8,
    /// Reaction likelihood attached by an upstream site-of-metabolism annotator.
    pub reactivity: Option<f64>,
}

impl Atom {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            implicit_hydrogens: 0,
            charge: 0,
            reactivity: None,
        }
    }

    pub fn with_hydrogens(mut self, count: u8) -> Self {
        self.implicit_hydrogens = count;
        self
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_reactivity(mut self, reactivity: f64) -> Self {
        self.reactivity = Some(reactivity);
        self
    }

    pub fn is_heavy(&self) -> bool {
        !element::is_hydrogen(&self.symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

/// The structural payload handed to and returned by the structure transform engine.
///
/// Atoms are addressed by their position in `atoms`; bonds refer to those positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MolecularGraph {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl MolecularGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Adds a bond between two existing atoms. Returns `false` if either index is out of range
    /// or the bond would connect an atom to itself.
    pub fn add_bond(&mut self, a: usize, b: usize, order: BondOrder) -> bool {
        if a == b || a >= self.atoms.len() || b >= self.atoms.len() {
            return false;
        }
        self.bonds.push(Bond { a, b, order });
        true
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_heavy()).count()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.symbol.as_str())
    }

    pub fn reactivity_of(&self, index: usize) -> Option<f64> {
        self.atoms.get(index).and_then(|a| a.reactivity)
    }

    /// Average molecular weight including implicit hydrogens, or `None` if any atom has a
    /// symbol missing from the element table.
    pub fn molecular_weight(&self) -> Option<f64> {
        let hydrogen = element::lookup("H")?.mass;
        self.atoms.iter().try_fold(0.0, |total, atom| {
            let data = element::lookup(&atom.symbol)?;
            Some(total + data.mass + f64::from(atom.implicit_hydrogens) * hydrogen)
        })
    }

    /// Number of connected components over all atoms (explicit hydrogens included).
    pub fn component_count(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.atoms.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut components = self.atoms.len();
        for bond in &self.bonds {
            let root_a = find(&mut parent, bond.a);
            let root_b = find(&mut parent, bond.b);
            if root_a != root_b {
                parent[root_a] = root_b;
                components -= 1;
            }
        }
        components
    }

    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds.iter().filter_map(move |bond| {
            if bond.a == index {
                Some(bond.b)
            } else if bond.b == index {
                Some(bond.a)
            } else {
                None
            }
        })
    }
}
