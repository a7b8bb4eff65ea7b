use phf::{Map, Set, phf_map, phf_set};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementData {
    pub atomic_number: u8,
    pub mass: f64,
}

const fn el(atomic_number: u8, mass: f64) -> ElementData {
    ElementData {
        atomic_number,
        mass,
    }
}

#[rustfmt::skip]
static ELEMENTS: Map<&'static str, ElementData> = phf_map! {
    // --- Organic subset ---
    "H"  => el(1, 1.008),   "B"  => el(5, 10.81),   "C"  => el(6, 12.011),
    "N"  => el(7, 14.007),  "O"  => el(8, 15.999),  "P"  => el(15, 30.974),
    "S"  => el(16, 32.06),

    // --- Halogens ---
    "F"  => el(9, 18.998),  "Cl" => el(17, 35.45),  "Br" => el(35, 79.904),
    "I"  => el(53, 126.904),

    // --- Metalloids ---
    "Si" => el(14, 28.085), "Ge" => el(32, 72.630), "As" => el(33, 74.922),
    "Se" => el(34, 78.971), "Te" => el(52, 127.60),

    // --- Common metals ---
    "Li" => el(3, 6.94),    "Na" => el(11, 22.990), "Mg" => el(12, 24.305),
    "Al" => el(13, 26.982), "K"  => el(19, 39.098), "Ca" => el(20, 40.078),
    "Fe" => el(26, 55.845), "Co" => el(27, 58.933), "Cu" => el(29, 63.546),
    "Zn" => el(30, 65.38),  "Pt" => el(78, 195.08), "Gd" => el(64, 157.25),
    "Hg" => el(80, 200.59), "Sn" => el(50, 118.71),
};

/// Elements accepted by default for metabolite prediction.
pub static DEFAULT_ALLOWED_ELEMENTS: Set<&'static str> = phf_set! {
    "H", "C", "N", "O", "S", "P", "F", "Cl", "Br", "I",
};

pub fn lookup(symbol: &str) -> Option<&'static ElementData> {
    ELEMENTS.get(symbol.trim())
}

pub fn is_hydrogen(symbol: &str) -> bool {
    matches!(symbol.trim(), "H" | "D" | "T")
}

pub fn default_allowed_elements() -> impl Iterator<Item = &'static str> {
    DEFAULT_ALLOWED_ELEMENTS.iter().copied()
}
