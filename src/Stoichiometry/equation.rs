//! Splitting of an equation string into species and rendering of the balanced result
use crate::Stoichiometry::balance_errors::BalanceError;
use crate::Stoichiometry::formula_parser::{FormulaCount, parse_formula};
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reactant,
    Product,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reactant => write!(f, "reactant"),
            Side::Product => write!(f, "product"),
        }
    }
}

/// one reactant or product of the equation
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub formula: String,
    pub composition: FormulaCount,
    pub side: Side,
}

impl Species {
    pub fn new(formula: &str, side: Side) -> Result<Self, BalanceError> {
        let composition = parse_formula(formula)?;
        Ok(Species {
            formula: formula.to_string(),
            composition,
            side,
        })
    }
}

/// Splits "A + B = C + D" into (["A", "B"], ["C", "D"]).
/// Exactly one '=' is accepted; every species must be non-empty after trimming.
pub fn split_equation(equation: &str) -> Result<(Vec<String>, Vec<String>), BalanceError> {
    let separators = equation.matches('=').count();
    if separators != 1 {
        return Err(BalanceError::MalformedEquation(format!(
            "expected exactly one '=' but found {} in '{}'",
            separators, equation
        )));
    }
    let Some((lhs, rhs)) = equation.split_once('=') else {
        return Err(BalanceError::MalformedEquation(equation.to_string()));
    };
    let reactants = split_side(lhs, Side::Reactant)?;
    let products = split_side(rhs, Side::Product)?;
    debug!("reactants: {:?}, products: {:?}", reactants, products);
    Ok((reactants, products))
}

fn split_side(side_text: &str, side: Side) -> Result<Vec<String>, BalanceError> {
    side_text
        .split('+')
        .map(|s| {
            let formula = s.trim();
            if formula.is_empty() {
                Err(BalanceError::MalformedEquation(format!(
                    "empty {} in '{}'",
                    side,
                    side_text.trim()
                )))
            } else {
                Ok(formula.to_string())
            }
        })
        .collect()
}

/// Parses every formula of the equation. Reactants come first, then products; this order
/// is the column order of the stoichiometric matrix and of the output.
pub fn parse_species(equation: &str) -> Result<Vec<Species>, BalanceError> {
    let (reactants, products) = split_equation(equation)?;
    let mut species = Vec::with_capacity(reactants.len() + products.len());
    for formula in &reactants {
        species.push(Species::new(formula, Side::Reactant)?);
    }
    for formula in &products {
        species.push(Species::new(formula, Side::Product)?);
    }
    Ok(species)
}

/// "2·H2O" for a coefficient of 2, bare "H2O" for 1
pub fn format_term(formula: &str, coefficient: u64, glyph: &str) -> String {
    if coefficient == 1 {
        formula.to_string()
    } else {
        format!("{}{}{}", coefficient, glyph, formula)
    }
}

/// Renders the balanced equation; `coefficients` is aligned with `species`
pub fn format_balanced(species: &[Species], coefficients: &[u64], glyph: &str) -> String {
    let side = |wanted: Side| {
        species
            .iter()
            .zip(coefficients)
            .filter(|(s, _)| s.side == wanted)
            .map(|(s, &c)| format_term(&s.formula, c, glyph))
            .collect::<Vec<_>>()
            .join(" + ")
    };
    format!("{} = {}", side(Side::Reactant), side(Side::Product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_equation_trims_whitespace() {
        let (reactants, products) = split_equation("CH4+O2 =CO2+ H2O").unwrap();
        assert_eq!(reactants, vec!["CH4", "O2"]);
        assert_eq!(products, vec!["CO2", "H2O"]);
    }

    #[test]
    fn test_split_equation_rejects_bad_separators() {
        assert!(matches!(
            split_equation("H2 + O2"),
            Err(BalanceError::MalformedEquation(_))
        ));
        assert!(matches!(
            split_equation("H2 = O2 = H2O"),
            Err(BalanceError::MalformedEquation(_))
        ));
        assert!(matches!(
            split_equation("H2 + = H2O"),
            Err(BalanceError::MalformedEquation(_))
        ));
        assert!(matches!(
            split_equation("= H2O"),
            Err(BalanceError::MalformedEquation(_))
        ));
    }

    #[test]
    fn test_parse_species_keeps_order_and_sides() {
        let species = parse_species("O2 + H2 = H2O").unwrap();
        let names: Vec<&str> = species.iter().map(|s| s.formula.as_str()).collect();
        assert_eq!(names, vec!["O2", "H2", "H2O"]);
        assert_eq!(species[1].side, Side::Reactant);
        assert_eq!(species[2].side, Side::Product);
        assert_eq!(species[2].composition.count_of("H"), 2);
    }

    #[test]
    fn test_parse_species_propagates_formula_errors() {
        assert!(matches!(
            parse_species("2Na + Cl2 = NaCl"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_species("Na + Xx = NaXx"),
            Err(BalanceError::UnknownElement { .. })
        ));
    }

    #[test]
    fn test_format_balanced() {
        let species = parse_species("O2 + H2 = H2O").unwrap();
        assert_eq!(
            format_balanced(&species, &[1, 2, 2], "·"),
            "O2 + 2·H2 = 2·H2O"
        );
        assert_eq!(format_balanced(&species, &[1, 2, 2], "*"), "O2 + 2*H2 = 2*H2O");
        assert_eq!(format_term("NaCl", 1, "·"), "NaCl");
    }
}
