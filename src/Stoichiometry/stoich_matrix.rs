use crate::Stoichiometry::elements::ElementSymbol;
use crate::Stoichiometry::equation::{Side, Species};
use crate::Stoichiometry::formula_parser::FormulaCount;
use log::debug;
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};

/// Signed element composition matrix of an equation.
///
/// Rows are elements in order of first appearance (reactants scanned before products),
/// columns are species in equation order. Reactant entries are positive atom counts,
/// product entries negative ones, so a balanced coefficient vector `x` satisfies `matrix * x = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoichMatrix {
    pub elements: Vec<ElementSymbol>,
    pub matrix: DMatrix<f64>,
}

impl StoichMatrix {
    pub fn build(reactants: &[FormulaCount], products: &[FormulaCount]) -> Self {
        let columns: Vec<(&FormulaCount, f64)> = reactants
            .iter()
            .map(|c| (c, 1.0))
            .chain(products.iter().map(|c| (c, -1.0)))
            .collect();

        let mut elements: Vec<ElementSymbol> = Vec::new();
        for (composition, _) in &columns {
            for element in composition.elements() {
                if !elements.contains(&element) {
                    elements.push(element);
                }
            }
        }

        let mut matrix = DMatrix::zeros(elements.len(), columns.len());
        for (j, (composition, sign)) in columns.iter().enumerate() {
            for (i, element) in elements.iter().enumerate() {
                if let Some(count) = composition.get(element) {
                    matrix[(i, j)] = sign * count as f64;
                }
            }
        }
        debug!("elements: {:?}, matrix: {}", elements, matrix);
        StoichMatrix { elements, matrix }
    }

    pub fn from_species(species: &[Species]) -> Self {
        let pick = |side: Side| {
            species
                .iter()
                .filter(|s| s.side == side)
                .map(|s| s.composition.clone())
                .collect::<Vec<_>>()
        };
        Self::build(&pick(Side::Reactant), &pick(Side::Product))
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// matrix * coefficients; all zeros for a balanced equation
    pub fn residual(&self, coefficients: &[u64]) -> DVector<f64> {
        let x = DVector::from_iterator(coefficients.len(), coefficients.iter().map(|&c| c as f64));
        &self.matrix * x
    }

    /// element x species table, species names taken from `column_names`
    pub fn to_table(&self, column_names: &[String]) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("Element")];
        for name in column_names {
            header.push(Cell::new(name));
        }
        table.add_row(Row::new(header));
        for (i, element) in self.elements.iter().enumerate() {
            let mut row = vec![Cell::new(element.as_str())];
            for j in 0..self.ncols() {
                row.push(Cell::new(&format!("{}", self.matrix[(i, j)])));
            }
            table.add_row(Row::new(row));
        }
        table
    }

    pub fn pretty_print(&self, column_names: &[String]) {
        self.to_table(column_names).printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stoichiometry::equation::parse_species;
    use crate::Stoichiometry::formula_parser::parse_formula;

    #[test]
    fn test_element_matrix() {
        let reactants = vec![parse_formula("CH4").unwrap(), parse_formula("O2").unwrap()];
        let products = vec![parse_formula("CO2").unwrap(), parse_formula("H2O").unwrap()];
        let stoich = StoichMatrix::build(&reactants, &products);
        let order: Vec<&str> = stoich.elements.iter().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["C", "H", "O"]);
        let expected = DMatrix::from_row_slice(
            3,
            4,
            &[
                1.0, 0.0, -1.0, 0.0, //
                4.0, 0.0, 0.0, -2.0, //
                0.0, 2.0, -2.0, -1.0,
            ],
        );
        assert_eq!(stoich.matrix, expected);
    }

    #[test]
    fn test_rows_follow_first_appearance_across_sides() {
        let species = parse_species("NaOH + HCl = NaCl + H2O").unwrap();
        let stoich = StoichMatrix::from_species(&species);
        let order: Vec<&str> = stoich.elements.iter().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["Na", "O", "H", "Cl"]);
        assert_eq!(stoich.nrows(), 4);
        assert_eq!(stoich.ncols(), 4);
        // Cl is absent from NaOH and H2O
        assert_eq!(stoich.matrix[(3, 0)], 0.0);
        assert_eq!(stoich.matrix[(3, 2)], -1.0);
    }

    #[test]
    fn test_residual_of_balanced_coefficients() {
        let species = parse_species("CH4 + O2 = CO2 + H2O").unwrap();
        let stoich = StoichMatrix::from_species(&species);
        assert!(stoich.residual(&[1, 2, 1, 2]).iter().all(|r| *r == 0.0));
        assert!(stoich.residual(&[1, 1, 1, 1]).iter().any(|r| *r != 0.0));
    }

    #[test]
    fn test_empty_input_gives_empty_matrix() {
        let stoich = StoichMatrix::build(&[], &[]);
        assert_eq!(stoich.nrows(), 0);
        assert_eq!(stoich.ncols(), 0);
        let stoich = StoichMatrix::build(&[FormulaCount::default()], &[]);
        assert_eq!(stoich.nrows(), 0);
        assert_eq!(stoich.ncols(), 1);
    }

    #[test]
    fn test_table_has_header_and_one_row_per_element() {
        let species = parse_species("O2 + H2 = H2O").unwrap();
        let stoich = StoichMatrix::from_species(&species);
        let names: Vec<String> = species.iter().map(|s| s.formula.clone()).collect();
        let table = stoich.to_table(&names);
        assert_eq!(table.len(), 3);
    }
}
