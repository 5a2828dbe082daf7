//! # Chemistry
//!
//! Periodic table lookup, atomic composition, mass percentage and percent
//! composition of a formula.
//!
//! ## Atomic composition
//!
//! - `p = Z`
//! - `n = A − Z`
//! - `e = Z − charge`
//!
//! and the inverses `Z = p`, `A = p + n`, `charge = p − e`.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::equations::chemistry::{element, percent_composition, CompositionRow};
//!
//! assert_eq!(element(11).map(|e| e.name), Some("Sodium"));
//!
//! // water: 2 H + 1 O
//! let water = percent_composition(&[
//!     CompositionRow { count: 2.0, element: Some(1) },
//!     CompositionRow { count: 1.0, element: Some(8) },
//! ]);
//! assert!((water.total_mass().unwrap() - 18.015).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One entry of the periodic table. `mass` is the standard atomic weight
/// in g/mol (mass number of the most stable isotope for synthetic elements).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Element {
    pub number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass: f64,
}

/// Elements 1 through 118, indexed by `number - 1`.
pub static ELEMENTS: [Element; 118] = [
    Element { number: 1, symbol: "H", name: "Hydrogen", mass: 1.008 },
    Element { number: 2, symbol: "He", name: "Helium", mass: 4.0026 },
    Element { number: 3, symbol: "Li", name: "Lithium", mass: 6.94 },
    Element { number: 4, symbol: "Be", name: "Beryllium", mass: 9.0122 },
    Element { number: 5, symbol: "B", name: "Boron", mass: 10.81 },
    Element { number: 6, symbol: "C", name: "Carbon", mass: 12.011 },
    Element { number: 7, symbol: "N", name: "Nitrogen", mass: 14.007 },
    Element { number: 8, symbol: "O", name: "Oxygen", mass: 15.999 },
    Element { number: 9, symbol: "F", name: "Fluorine", mass: 18.998 },
    Element { number: 10, symbol: "Ne", name: "Neon", mass: 20.180 },
    Element { number: 11, symbol: "Na", name: "Sodium", mass: 22.990 },
    Element { number: 12, symbol: "Mg", name: "Magnesium", mass: 24.305 },
    Element { number: 13, symbol: "Al", name: "Aluminium", mass: 26.982 },
    Element { number: 14, symbol: "Si", name: "Silicon", mass: 28.085 },
    Element { number: 15, symbol: "P", name: "Phosphorus", mass: 30.974 },
    Element { number: 16, symbol: "S", name: "Sulfur", mass: 32.06 },
    Element { number: 17, symbol: "Cl", name: "Chlorine", mass: 35.45 },
    Element { number: 18, symbol: "Ar", name: "Argon", mass: 39.948 },
    Element { number: 19, symbol: "K", name: "Potassium", mass: 39.098 },
    Element { number: 20, symbol: "Ca", name: "Calcium", mass: 40.078 },
    Element { number: 21, symbol: "Sc", name: "Scandium", mass: 44.956 },
    Element { number: 22, symbol: "Ti", name: "Titanium", mass: 47.867 },
    Element { number: 23, symbol: "V", name: "Vanadium", mass: 50.942 },
    Element { number: 24, symbol: "Cr", name: "Chromium", mass: 51.996 },
    Element { number: 25, symbol: "Mn", name: "Manganese", mass: 54.938 },
    Element { number: 26, symbol: "Fe", name: "Iron", mass: 55.845 },
    Element { number: 27, symbol: "Co", name: "Cobalt", mass: 58.933 },
    Element { number: 28, symbol: "Ni", name: "Nickel", mass: 58.693 },
    Element { number: 29, symbol: "Cu", name: "Copper", mass: 63.546 },
    Element { number: 30, symbol: "Zn", name: "Zinc", mass: 65.38 },
    Element { number: 31, symbol: "Ga", name: "Gallium", mass: 69.723 },
    Element { number: 32, symbol: "Ge", name: "Germanium", mass: 72.630 },
    Element { number: 33, symbol: "As", name: "Arsenic", mass: 74.922 },
    Element { number: 34, symbol: "Se", name: "Selenium", mass: 78.971 },
    Element { number: 35, symbol: "Br", name: "Bromine", mass: 79.904 },
    Element { number: 36, symbol: "Kr", name: "Krypton", mass: 83.798 },
    Element { number: 37, symbol: "Rb", name: "Rubidium", mass: 85.468 },
    Element { number: 38, symbol: "Sr", name: "Strontium", mass: 87.62 },
    Element { number: 39, symbol: "Y", name: "Yttrium", mass: 88.906 },
    Element { number: 40, symbol: "Zr", name: "Zirconium", mass: 91.224 },
    Element { number: 41, symbol: "Nb", name: "Niobium", mass: 92.906 },
    Element { number: 42, symbol: "Mo", name: "Molybdenum", mass: 95.95 },
    Element { number: 43, symbol: "Tc", name: "Technetium", mass: 98.0 },
    Element { number: 44, symbol: "Ru", name: "Ruthenium", mass: 101.07 },
    Element { number: 45, symbol: "Rh", name: "Rhodium", mass: 102.91 },
    Element { number: 46, symbol: "Pd", name: "Palladium", mass: 106.42 },
    Element { number: 47, symbol: "Ag", name: "Silver", mass: 107.87 },
    Element { number: 48, symbol: "Cd", name: "Cadmium", mass: 112.41 },
    Element { number: 49, symbol: "In", name: "Indium", mass: 114.82 },
    Element { number: 50, symbol: "Sn", name: "Tin", mass: 118.71 },
    Element { number: 51, symbol: "Sb", name: "Antimony", mass: 121.76 },
    Element { number: 52, symbol: "Te", name: "Tellurium", mass: 127.60 },
    Element { number: 53, symbol: "I", name: "Iodine", mass: 126.90 },
    Element { number: 54, symbol: "Xe", name: "Xenon", mass: 131.29 },
    Element { number: 55, symbol: "Cs", name: "Cesium", mass: 132.91 },
    Element { number: 56, symbol: "Ba", name: "Barium", mass: 137.33 },
    Element { number: 57, symbol: "La", name: "Lanthanum", mass: 138.91 },
    Element { number: 58, symbol: "Ce", name: "Cerium", mass: 140.12 },
    Element { number: 59, symbol: "Pr", name: "Praseodymium", mass: 140.91 },
    Element { number: 60, symbol: "Nd", name: "Neodymium", mass: 144.24 },
    Element { number: 61, symbol: "Pm", name: "Promethium", mass: 145.0 },
    Element { number: 62, symbol: "Sm", name: "Samarium", mass: 150.36 },
    Element { number: 63, symbol: "Eu", name: "Europium", mass: 151.96 },
    Element { number: 64, symbol: "Gd", name: "Gadolinium", mass: 157.25 },
    Element { number: 65, symbol: "Tb", name: "Terbium", mass: 158.93 },
    Element { number: 66, symbol: "Dy", name: "Dysprosium", mass: 162.50 },
    Element { number: 67, symbol: "Ho", name: "Holmium", mass: 164.93 },
    Element { number: 68, symbol: "Er", name: "Erbium", mass: 167.26 },
    Element { number: 69, symbol: "Tm", name: "Thulium", mass: 168.93 },
    Element { number: 70, symbol: "Yb", name: "Ytterbium", mass: 173.05 },
    Element { number: 71, symbol: "Lu", name: "Lutetium", mass: 174.97 },
    Element { number: 72, symbol: "Hf", name: "Hafnium", mass: 178.49 },
    Element { number: 73, symbol: "Ta", name: "Tantalum", mass: 180.95 },
    Element { number: 74, symbol: "W", name: "Tungsten", mass: 183.84 },
    Element { number: 75, symbol: "Re", name: "Rhenium", mass: 186.21 },
    Element { number: 76, symbol: "Os", name: "Osmium", mass: 190.23 },
    Element { number: 77, symbol: "Ir", name: "Iridium", mass: 192.22 },
    Element { number: 78, symbol: "Pt", name: "Platinum", mass: 195.08 },
    Element { number: 79, symbol: "Au", name: "Gold", mass: 196.97 },
    Element { number: 80, symbol: "Hg", name: "Mercury", mass: 200.59 },
    Element { number: 81, symbol: "Tl", name: "Thallium", mass: 204.38 },
    Element { number: 82, symbol: "Pb", name: "Lead", mass: 207.2 },
    Element { number: 83, symbol: "Bi", name: "Bismuth", mass: 208.98 },
    Element { number: 84, symbol: "Po", name: "Polonium", mass: 209.0 },
    Element { number: 85, symbol: "At", name: "Astatine", mass: 210.0 },
    Element { number: 86, symbol: "Rn", name: "Radon", mass: 222.0 },
    Element { number: 87, symbol: "Fr", name: "Francium", mass: 223.0 },
    Element { number: 88, symbol: "Ra", name: "Radium", mass: 226.0 },
    Element { number: 89, symbol: "Ac", name: "Actinium", mass: 227.0 },
    Element { number: 90, symbol: "Th", name: "Thorium", mass: 232.04 },
    Element { number: 91, symbol: "Pa", name: "Protactinium", mass: 231.04 },
    Element { number: 92, symbol: "U", name: "Uranium", mass: 238.03 },
    Element { number: 93, symbol: "Np", name: "Neptunium", mass: 237.0 },
    Element { number: 94, symbol: "Pu", name: "Plutonium", mass: 244.0 },
    Element { number: 95, symbol: "Am", name: "Americium", mass: 243.0 },
    Element { number: 96, symbol: "Cm", name: "Curium", mass: 247.0 },
    Element { number: 97, symbol: "Bk", name: "Berkelium", mass: 247.0 },
    Element { number: 98, symbol: "Cf", name: "Californium", mass: 251.0 },
    Element { number: 99, symbol: "Es", name: "Einsteinium", mass: 252.0 },
    Element { number: 100, symbol: "Fm", name: "Fermium", mass: 257.0 },
    Element { number: 101, symbol: "Md", name: "Mendelevium", mass: 258.0 },
    Element { number: 102, symbol: "No", name: "Nobelium", mass: 259.0 },
    Element { number: 103, symbol: "Lr", name: "Lawrencium", mass: 262.0 },
    Element { number: 104, symbol: "Rf", name: "Rutherfordium", mass: 267.0 },
    Element { number: 105, symbol: "Db", name: "Dubnium", mass: 268.0 },
    Element { number: 106, symbol: "Sg", name: "Seaborgium", mass: 271.0 },
    Element { number: 107, symbol: "Bh", name: "Bohrium", mass: 272.0 },
    Element { number: 108, symbol: "Hs", name: "Hassium", mass: 270.0 },
    Element { number: 109, symbol: "Mt", name: "Meitnerium", mass: 276.0 },
    Element { number: 110, symbol: "Ds", name: "Darmstadtium", mass: 281.0 },
    Element { number: 111, symbol: "Rg", name: "Roentgenium", mass: 280.0 },
    Element { number: 112, symbol: "Cn", name: "Copernicium", mass: 285.0 },
    Element { number: 113, symbol: "Nh", name: "Nihonium", mass: 284.0 },
    Element { number: 114, symbol: "Fl", name: "Flerovium", mass: 289.0 },
    Element { number: 115, symbol: "Mc", name: "Moscovium", mass: 288.0 },
    Element { number: 116, symbol: "Lv", name: "Livermorium", mass: 293.0 },
    Element { number: 117, symbol: "Ts", name: "Tennessine", mass: 294.0 },
    Element { number: 118, symbol: "Og", name: "Oganesson", mass: 294.0 },
];

/// Element with atomic number `z`, if 1 ≤ z ≤ 118.
pub fn element(z: i64) -> Option<&'static Element> {
    if z < 1 {
        return None;
    }
    ELEMENTS.get(usize::try_from(z - 1).ok()?)
}

// =============================================================================
// ATOMIC COMPOSITION
// =============================================================================

/// What the atom calculator shows for the current (Z, A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AtomSummary {
    /// No atomic number yet.
    Empty,
    /// Atomic number outside the table.
    InvalidNumber(i64),
    Identified {
        element: &'static Element,
        mass_number: Option<i64>,
    },
}

pub fn describe_atom(z: Option<i64>, a: Option<i64>) -> AtomSummary {
    match z {
        None => AtomSummary::Empty,
        Some(z) => match element(z) {
            Some(element) => AtomSummary::Identified { element, mass_number: a },
            None => AtomSummary::InvalidNumber(z),
        },
    }
}

#[inline]
pub fn neutrons(mass_number: f64, atomic_number: f64) -> f64 {
    mass_number - atomic_number
}

#[inline]
pub fn electrons(atomic_number: f64, charge: f64) -> f64 {
    atomic_number - charge
}

#[inline]
pub fn mass_number(protons: f64, neutrons: f64) -> f64 {
    protons + neutrons
}

#[inline]
pub fn charge(protons: f64, electrons: f64) -> f64 {
    protons - electrons
}

// =============================================================================
// MASS PERCENTAGE
// =============================================================================

/// part / whole × 100
pub fn mass_percent(part: f64, whole: f64) -> CalcResult<f64> {
    if whole <= 0.0 {
        return Err(CalcError::invalid_input(
            "mass",
            whole.to_string(),
            "Total mass must be greater than zero",
        ));
    }
    Ok(part / whole * 100.0)
}

/// whole × percent / 100
#[inline]
pub fn part_from_percent(whole: f64, percent: f64) -> f64 {
    whole * percent / 100.0
}

/// part / (percent / 100)
pub fn whole_from_percent(part: f64, percent: f64) -> CalcResult<f64> {
    if percent <= 0.0 {
        return Err(CalcError::invalid_input(
            "percent",
            percent.to_string(),
            "Percentage must be greater than zero",
        ));
    }
    Ok(part / (percent / 100.0))
}

// =============================================================================
// PERCENT COMPOSITION
// =============================================================================

/// One row of the composition form: an atom count and an atomic number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    pub count: f64,
    pub element: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositionPart {
    pub element: &'static Element,
    pub count: f64,
    /// count × atomic mass (g/mol)
    pub mass: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Composition {
    /// No row has both a positive count and an element.
    Empty,
    /// Rows were filled but contributed no mass.
    Invalid,
    Resolved {
        total_mass: f64,
        parts: Vec<CompositionPart>,
    },
}

impl Composition {
    pub fn total_mass(&self) -> Option<f64> {
        match self {
            Composition::Resolved { total_mass, .. } => Some(*total_mass),
            _ => None,
        }
    }
}

/// Mass share of each element in a formula. Rows with a non-positive count
/// or no element are skipped.
pub fn percent_composition(rows: &[CompositionRow]) -> Composition {
    let mut filled = false;
    let mut components = Vec::new();
    for row in rows {
        let Some(z) = row.element else { continue };
        if !(row.count > 0.0) {
            continue;
        }
        filled = true;
        if let Some(element) = element(z) {
            components.push((element, row.count, row.count * element.mass));
        }
    }
    let total_mass: f64 = components.iter().map(|(_, _, m)| m).sum();
    if !filled {
        return Composition::Empty;
    }
    if total_mass <= 0.0 {
        return Composition::Invalid;
    }
    let parts = components
        .into_iter()
        .map(|(element, count, mass)| CompositionPart {
            element,
            count,
            mass,
            percent: mass / total_mass * 100.0,
        })
        .collect();
    Composition::Resolved { total_mass, parts }
}
