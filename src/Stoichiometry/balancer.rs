//! The balancing pipeline: equation text -> species -> matrix -> integer coefficients -> text
use crate::Stoichiometry::balance_errors::BalanceError;
use crate::Stoichiometry::equation::{Side, Species, format_balanced, parse_species};
use crate::Stoichiometry::null_space::solve_coefficients;
use crate::Stoichiometry::stoich_matrix::StoichMatrix;
use crate::settings::BalancerConfig;
use log::{info, warn};
use std::fmt;

/// A balanced equation: species in input order with their integer coefficients.
#[derive(Debug, Clone)]
pub struct BalancedReaction {
    pub species: Vec<Species>,
    pub coefficients: Vec<u64>,
    pub stoich_matrix: StoichMatrix,
    glyph: String,
}

impl BalancedReaction {
    pub fn reactants(&self) -> impl Iterator<Item = (&Species, u64)> {
        self.side(Side::Reactant)
    }

    pub fn products(&self) -> impl Iterator<Item = (&Species, u64)> {
        self.side(Side::Product)
    }

    fn side(&self, side: Side) -> impl Iterator<Item = (&Species, u64)> {
        self.species
            .iter()
            .zip(self.coefficients.iter().copied())
            .filter(move |(s, _)| s.side == side)
    }

    /// coefficient of the first species written exactly as `formula`
    pub fn coefficient_of(&self, formula: &str) -> Option<u64> {
        self.species
            .iter()
            .position(|s| s.formula == formula)
            .map(|i| self.coefficients[i])
    }

    pub fn species_names(&self) -> Vec<String> {
        self.species.iter().map(|s| s.formula.clone()).collect()
    }

    /// Total mass of each side (sum of coefficient x molar mass). Equal up to rounding
    /// of the atomic weights when the equation is balanced.
    pub fn side_masses(&self) -> (f64, f64) {
        let mass = |side: Side| {
            self.side(side)
                .map(|(s, c)| c as f64 * s.composition.molar_mass())
                .sum::<f64>()
        };
        (mass(Side::Reactant), mass(Side::Product))
    }

    pub fn pretty_print(&self) {
        self.stoich_matrix.pretty_print(&self.species_names());
    }
}

impl fmt::Display for BalancedReaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_balanced(
            &self.species,
            &self.coefficients,
            &self.glyph,
        ))
    }
}

/// Balances `equation` with the given settings.
///
/// # Examples
/// ```
/// use ReBalance::Stoichiometry::balancer::balance;
/// use ReBalance::settings::BalancerConfig;
/// let balanced = balance("CH4 + O2 = CO2 + H2O", &BalancerConfig::default()).unwrap();
/// assert_eq!(balanced.to_string(), "CH4 + 2·O2 = CO2 + 2·H2O");
/// assert_eq!(balanced.coefficient_of("O2"), Some(2));
/// ```
pub fn balance(equation: &str, config: &BalancerConfig) -> Result<BalancedReaction, BalanceError> {
    let result = parse_species(equation).and_then(|species| {
        let stoich_matrix = StoichMatrix::from_species(&species);
        let coefficients = solve_coefficients(&stoich_matrix.matrix, config)?;
        Ok(BalancedReaction {
            species,
            coefficients,
            stoich_matrix,
            glyph: config.multiplication_glyph.clone(),
        })
    });
    match &result {
        Ok(balanced) => info!("balanced '{}' => '{}'", equation, balanced),
        Err(e) => warn!("could not balance '{}': {}", equation, e),
    }
    result
}

/// Balances `equation` with default settings and returns the balanced equation text,
/// e.g. "O2 + H2 = H2O" => "O2 + 2·H2 = 2·H2O".
pub fn balance_chemical_reaction(equation: &str) -> Result<String, BalanceError> {
    balance(equation, &BalancerConfig::default()).map(|balanced| balanced.to_string())
}
