//! Static table of the known chemical elements and their standard atomic weights.
//!
//! The table is the only bundled resource of the crate. It is turned into a lookup
//! map once per process and shared read-only afterwards.
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

// Define a struct to hold element data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_number: u8,
    pub atomic_mass: f64,
}

// Elements 1-118, standard atomic weights (mass number of the most stable isotope for
// elements without a stable one)
pub const ELEMENTS: &[Element] = &[
    Element {
        symbol: "H",
        atomic_number: 1,
        atomic_mass: 1.008,
    },
    Element {
        symbol: "He",
        atomic_number: 2,
        atomic_mass: 4.0026,
    },
    Element {
        symbol: "Li",
        atomic_number: 3,
        atomic_mass: 6.94,
    },
    Element {
        symbol: "Be",
        atomic_number: 4,
        atomic_mass: 9.0122,
    },
    Element {
        symbol: "B",
        atomic_number: 5,
        atomic_mass: 10.81,
    },
    Element {
        symbol: "C",
        atomic_number: 6,
        atomic_mass: 12.011,
    },
    Element {
        symbol: "N",
        atomic_number: 7,
        atomic_mass: 14.007,
    },
    Element {
        symbol: "O",
        atomic_number: 8,
        atomic_mass: 15.999,
    },
    Element {
        symbol: "F",
        atomic_number: 9,
        atomic_mass: 18.998,
    },
    Element {
        symbol: "Ne",
        atomic_number: 10,
        atomic_mass: 20.180,
    },
    Element {
        symbol: "Na",
        atomic_number: 11,
        atomic_mass: 22.990,
    },
    Element {
        symbol: "Mg",
        atomic_number: 12,
        atomic_mass: 24.305,
    },
    Element {
        symbol: "Al",
        atomic_number: 13,
        atomic_mass: 26.982,
    },
    Element {
        symbol: "Si",
        atomic_number: 14,
        atomic_mass: 28.085,
    },
    Element {
        symbol: "P",
        atomic_number: 15,
        atomic_mass: 30.974,
    },
    Element {
        symbol: "S",
        atomic_number: 16,
        atomic_mass: 32.06,
    },
    Element {
        symbol: "Cl",
        atomic_number: 17,
        atomic_mass: 35.45,
    },
    Element {
        symbol: "Ar",
        atomic_number: 18,
        atomic_mass: 39.948,
    },
    Element {
        symbol: "K",
        atomic_number: 19,
        atomic_mass: 39.098,
    },
    Element {
        symbol: "Ca",
        atomic_number: 20,
        atomic_mass: 40.078,
    },
    Element {
        symbol: "Sc",
        atomic_number: 21,
        atomic_mass: 44.956,
    },
    Element {
        symbol: "Ti",
        atomic_number: 22,
        atomic_mass: 47.867,
    },
    Element {
        symbol: "V",
        atomic_number: 23,
        atomic_mass: 50.942,
    },
    Element {
        symbol: "Cr",
        atomic_number: 24,
        atomic_mass: 51.996,
    },
    Element {
        symbol: "Mn",
        atomic_number: 25,
        atomic_mass: 54.938,
    },
    Element {
        symbol: "Fe",
        atomic_number: 26,
        atomic_mass: 55.845,
    },
    Element {
        symbol: "Co",
        atomic_number: 27,
        atomic_mass: 58.933,
    },
    Element {
        symbol: "Ni",
        atomic_number: 28,
        atomic_mass: 58.693,
    },
    Element {
        symbol: "Cu",
        atomic_number: 29,
        atomic_mass: 63.546,
    },
    Element {
        symbol: "Zn",
        atomic_number: 30,
        atomic_mass: 65.38,
    },
    Element {
        symbol: "Ga",
        atomic_number: 31,
        atomic_mass: 69.723,
    },
    Element {
        symbol: "Ge",
        atomic_number: 32,
        atomic_mass: 72.630,
    },
    Element {
        symbol: "As",
        atomic_number: 33,
        atomic_mass: 74.922,
    },
    Element {
        symbol: "Se",
        atomic_number: 34,
        atomic_mass: 78.971,
    },
    Element {
        symbol: "Br",
        atomic_number: 35,
        atomic_mass: 79.904,
    },
    Element {
        symbol: "Kr",
        atomic_number: 36,
        atomic_mass: 83.798,
    },
    Element {
        symbol: "Rb",
        atomic_number: 37,
        atomic_mass: 85.468,
    },
    Element {
        symbol: "Sr",
        atomic_number: 38,
        atomic_mass: 87.62,
    },
    Element {
        symbol: "Y",
        atomic_number: 39,
        atomic_mass: 88.906,
    },
    Element {
        symbol: "Zr",
        atomic_number: 40,
        atomic_mass: 91.224,
    },
    Element {
        symbol: "Nb",
        atomic_number: 41,
        atomic_mass: 92.906,
    },
    Element {
        symbol: "Mo",
        atomic_number: 42,
        atomic_mass: 95.95,
    },
    Element {
        symbol: "Tc",
        atomic_number: 43,
        atomic_mass: 98.0,
    },
    Element {
        symbol: "Ru",
        atomic_number: 44,
        atomic_mass: 101.07,
    },
    Element {
        symbol: "Rh",
        atomic_number: 45,
        atomic_mass: 102.91,
    },
    Element {
        symbol: "Pd",
        atomic_number: 46,
        atomic_mass: 106.42,
    },
    Element {
        symbol: "Ag",
        atomic_number: 47,
        atomic_mass: 107.87,
    },
    Element {
        symbol: "Cd",
        atomic_number: 48,
        atomic_mass: 112.41,
    },
    Element {
        symbol: "In",
        atomic_number: 49,
        atomic_mass: 114.82,
    },
    Element {
        symbol: "Sn",
        atomic_number: 50,
        atomic_mass: 118.71,
    },
    Element {
        symbol: "Sb",
        atomic_number: 51,
        atomic_mass: 121.76,
    },
    Element {
        symbol: "Te",
        atomic_number: 52,
        atomic_mass: 127.60,
    },
    Element {
        symbol: "I",
        atomic_number: 53,
        atomic_mass: 126.90,
    },
    Element {
        symbol: "Xe",
        atomic_number: 54,
        atomic_mass: 131.29,
    },
    Element {
        symbol: "Cs",
        atomic_number: 55,
        atomic_mass: 132.91,
    },
    Element {
        symbol: "Ba",
        atomic_number: 56,
        atomic_mass: 137.33,
    },
    Element {
        symbol: "La",
        atomic_number: 57,
        atomic_mass: 138.91,
    },
    Element {
        symbol: "Ce",
        atomic_number: 58,
        atomic_mass: 140.12,
    },
    Element {
        symbol: "Pr",
        atomic_number: 59,
        atomic_mass: 140.91,
    },
    Element {
        symbol: "Nd",
        atomic_number: 60,
        atomic_mass: 144.24,
    },
    Element {
        symbol: "Pm",
        atomic_number: 61,
        atomic_mass: 145.0,
    },
    Element {
        symbol: "Sm",
        atomic_number: 62,
        atomic_mass: 150.36,
    },
    Element {
        symbol: "Eu",
        atomic_number: 63,
        atomic_mass: 151.96,
    },
    Element {
        symbol: "Gd",
        atomic_number: 64,
        atomic_mass: 157.25,
    },
    Element {
        symbol: "Tb",
        atomic_number: 65,
        atomic_mass: 158.93,
    },
    Element {
        symbol: "Dy",
        atomic_number: 66,
        atomic_mass: 162.50,
    },
    Element {
        symbol: "Ho",
        atomic_number: 67,
        atomic_mass: 164.93,
    },
    Element {
        symbol: "Er",
        atomic_number: 68,
        atomic_mass: 167.26,
    },
    Element {
        symbol: "Tm",
        atomic_number: 69,
        atomic_mass: 168.93,
    },
    Element {
        symbol: "Yb",
        atomic_number: 70,
        atomic_mass: 173.05,
    },
    Element {
        symbol: "Lu",
        atomic_number: 71,
        atomic_mass: 174.97,
    },
    Element {
        symbol: "Hf",
        atomic_number: 72,
        atomic_mass: 178.49,
    },
    Element {
        symbol: "Ta",
        atomic_number: 73,
        atomic_mass: 180.95,
    },
    Element {
        symbol: "W",
        atomic_number: 74,
        atomic_mass: 183.84,
    },
    Element {
        symbol: "Re",
        atomic_number: 75,
        atomic_mass: 186.21,
    },
    Element {
        symbol: "Os",
        atomic_number: 76,
        atomic_mass: 190.23,
    },
    Element {
        symbol: "Ir",
        atomic_number: 77,
        atomic_mass: 192.22,
    },
    Element {
        symbol: "Pt",
        atomic_number: 78,
        atomic_mass: 195.08,
    },
    Element {
        symbol: "Au",
        atomic_number: 79,
        atomic_mass: 196.97,
    },
    Element {
        symbol: "Hg",
        atomic_number: 80,
        atomic_mass: 200.59,
    },
    Element {
        symbol: "Tl",
        atomic_number: 81,
        atomic_mass: 204.38,
    },
    Element {
        symbol: "Pb",
        atomic_number: 82,
        atomic_mass: 207.2,
    },
    Element {
        symbol: "Bi",
        atomic_number: 83,
        atomic_mass: 208.98,
    },
    Element {
        symbol: "Po",
        atomic_number: 84,
        atomic_mass: 209.0,
    },
    Element {
        symbol: "At",
        atomic_number: 85,
        atomic_mass: 210.0,
    },
    Element {
        symbol: "Rn",
        atomic_number: 86,
        atomic_mass: 222.0,
    },
    Element {
        symbol: "Fr",
        atomic_number: 87,
        atomic_mass: 223.0,
    },
    Element {
        symbol: "Ra",
        atomic_number: 88,
        atomic_mass: 226.0,
    },
    Element {
        symbol: "Ac",
        atomic_number: 89,
        atomic_mass: 227.0,
    },
    Element {
        symbol: "Th",
        atomic_number: 90,
        atomic_mass: 232.04,
    },
    Element {
        symbol: "Pa",
        atomic_number: 91,
        atomic_mass: 231.04,
    },
    Element {
        symbol: "U",
        atomic_number: 92,
        atomic_mass: 238.03,
    },
    Element {
        symbol: "Np",
        atomic_number: 93,
        atomic_mass: 237.0,
    },
    Element {
        symbol: "Pu",
        atomic_number: 94,
        atomic_mass: 244.0,
    },
    Element {
        symbol: "Am",
        atomic_number: 95,
        atomic_mass: 243.0,
    },
    Element {
        symbol: "Cm",
        atomic_number: 96,
        atomic_mass: 247.0,
    },
    Element {
        symbol: "Bk",
        atomic_number: 97,
        atomic_mass: 247.0,
    },
    Element {
        symbol: "Cf",
        atomic_number: 98,
        atomic_mass: 251.0,
    },
    Element {
        symbol: "Es",
        atomic_number: 99,
        atomic_mass: 252.0,
    },
    Element {
        symbol: "Fm",
        atomic_number: 100,
        atomic_mass: 257.0,
    },
    Element {
        symbol: "Md",
        atomic_number: 101,
        atomic_mass: 258.0,
    },
    Element {
        symbol: "No",
        atomic_number: 102,
        atomic_mass: 259.0,
    },
    Element {
        symbol: "Lr",
        atomic_number: 103,
        atomic_mass: 266.0,
    },
    Element {
        symbol: "Rf",
        atomic_number: 104,
        atomic_mass: 267.0,
    },
    Element {
        symbol: "Db",
        atomic_number: 105,
        atomic_mass: 268.0,
    },
    Element {
        symbol: "Sg",
        atomic_number: 106,
        atomic_mass: 269.0,
    },
    Element {
        symbol: "Bh",
        atomic_number: 107,
        atomic_mass: 270.0,
    },
    Element {
        symbol: "Hs",
        atomic_number: 108,
        atomic_mass: 277.0,
    },
    Element {
        symbol: "Mt",
        atomic_number: 109,
        atomic_mass: 278.0,
    },
    Element {
        symbol: "Ds",
        atomic_number: 110,
        atomic_mass: 281.0,
    },
    Element {
        symbol: "Rg",
        atomic_number: 111,
        atomic_mass: 282.0,
    },
    Element {
        symbol: "Cn",
        atomic_number: 112,
        atomic_mass: 285.0,
    },
    Element {
        symbol: "Nh",
        atomic_number: 113,
        atomic_mass: 286.0,
    },
    Element {
        symbol: "Fl",
        atomic_number: 114,
        atomic_mass: 289.0,
    },
    Element {
        symbol: "Mc",
        atomic_number: 115,
        atomic_mass: 290.0,
    },
    Element {
        symbol: "Lv",
        atomic_number: 116,
        atomic_mass: 293.0,
    },
    Element {
        symbol: "Ts",
        atomic_number: 117,
        atomic_mass: 294.0,
    },
    Element {
        symbol: "Og",
        atomic_number: 118,
        atomic_mass: 294.0,
    },
];

/// symbol -> element lookup, built on first use
static ELEMENT_INDEX: OnceLock<HashMap<&'static str, &'static Element>> = OnceLock::new();

fn element_index() -> &'static HashMap<&'static str, &'static Element> {
    ELEMENT_INDEX.get_or_init(|| ELEMENTS.iter().map(|e| (e.symbol, e)).collect())
}

/// Looks up an element by its symbol. Symbols are case sensitive
/// ("Co" is cobalt, "CO" is not a symbol).
pub fn find_element(symbol: &str) -> Option<&'static Element> {
    element_index().get(symbol).copied()
}

pub fn is_known_element(symbol: &str) -> bool {
    element_index().contains_key(symbol)
}

/// A validated atomic symbol. The only way to get one is through the element table,
/// so every `ElementSymbol` in the crate names a real element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementSymbol(&'static str);

impl ElementSymbol {
    pub fn parse(symbol: &str) -> Option<Self> {
        find_element(symbol).map(|element| ElementSymbol(element.symbol))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn element(&self) -> &'static Element {
        // the symbol came from the table, so the lookup cannot miss
        element_index()[self.0]
    }

    pub fn atomic_mass(&self) -> f64 {
        self.element().atomic_mass
    }
}

impl fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
