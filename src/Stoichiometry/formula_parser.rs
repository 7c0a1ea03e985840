//! Module to expand a chemical formula into its atomic composition
//!
//! The formula is tokenized into element symbols, integer multipliers and brackets.
//! Tokens are assembled into a tree of `Node`s with an explicit stack of frames (one frame
//! per open bracket), then the tree is flattened depth-first and the atoms are tallied.
use crate::Stoichiometry::balance_errors::BalanceError;
use crate::Stoichiometry::elements::ElementSymbol;
use crate::Stoichiometry::null_space::gcd;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Upper bound on the number of atoms a single formula may expand to
pub const MAX_EXPANDED_ATOMS: usize = 1_000_000;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    // the pattern is a literal, so compilation cannot fail at runtime
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Z][a-z]?|[0-9]+|\(|\))").expect("valid token regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Element(&'a str),
    Number(&'a str),
    Open,
    Close,
}

/// Splits a formula into element symbols, numbers and brackets,
/// e.g. 'Ca(OH)2' => [Ca, (, O, H, ), 2]. Anything else is an invalid character.
pub fn tokenize(formula: &str) -> Result<Vec<Token<'_>>, BalanceError> {
    let re = token_regex();
    let mut tokens = Vec::new();
    let mut position = 0;
    while position < formula.len() {
        let rest = &formula[position..];
        let Some(found) = re.find(rest) else {
            // rest is non-empty, so there is a next char
            let character = rest.chars().next().unwrap_or_default();
            return Err(BalanceError::InvalidCharacter {
                character,
                position: formula[..position].chars().count(),
                formula: formula.to_string(),
            });
        };
        let text = found.as_str();
        let token = match text {
            "(" => Token::Open,
            ")" => Token::Close,
            t if t.as_bytes()[0].is_ascii_digit() => Token::Number(t),
            t => Token::Element(t),
        };
        tokens.push(token);
        position += text.len();
    }
    Ok(tokens)
}

/// A formula tree: either one atom or a bracketed group of nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Atom(ElementSymbol),
    Group(Vec<Node>),
}

impl Node {
    /// number of atoms the node stands for once flattened
    pub fn atom_count(&self) -> usize {
        match self {
            Node::Atom(_) => 1,
            Node::Group(nodes) => nodes.iter().map(Node::atom_count).sum(),
        }
    }
}

// working sequence of one bracket level
#[derive(Debug, Default)]
struct Frame {
    nodes: Vec<Node>,
    atoms: usize,
}

/// Builds the formula tree. A number repeats the node just before it, so after `)` it
/// repeats the whole group, nested groups included.
pub fn parse_nodes(formula: &str) -> Result<Vec<Node>, BalanceError> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut current = Frame::default();

    for token in tokenize(formula)? {
        match token {
            Token::Element(symbol) => {
                let element =
                    ElementSymbol::parse(symbol).ok_or_else(|| BalanceError::UnknownElement {
                        symbol: symbol.to_string(),
                        formula: formula.to_string(),
                    })?;
                current.nodes.push(Node::Atom(element));
                current.atoms += 1;
            }
            Token::Number(digits) => {
                let multiplier: usize = digits.parse().map_err(|_| {
                    BalanceError::malformed_formula(
                        formula,
                        format!("multiplier {} is too large", digits),
                    )
                })?;
                if multiplier == 0 {
                    return Err(BalanceError::malformed_formula(formula, "multiplier 0"));
                }
                let last = current.nodes.last().cloned().ok_or_else(|| {
                    BalanceError::malformed_formula(
                        formula,
                        format!("multiplier {} has no preceding atom or group", digits),
                    )
                })?;
                let extra = multiplier - 1;
                let added = last
                    .atom_count()
                    .checked_mul(extra)
                    .and_then(|n| n.checked_add(current.atoms))
                    .filter(|&n| n <= MAX_EXPANDED_ATOMS)
                    .ok_or_else(|| {
                        BalanceError::malformed_formula(
                            formula,
                            format!("expands to more than {} atoms", MAX_EXPANDED_ATOMS),
                        )
                    })?;
                current.atoms = added;
                current.nodes.extend(std::iter::repeat(last).take(extra));
            }
            Token::Open => {
                stack.push(std::mem::take(&mut current));
            }
            Token::Close => {
                let outer = stack.pop().ok_or_else(|| {
                    BalanceError::unbalanced_parentheses(formula, "')' without matching '('")
                })?;
                let closed = std::mem::replace(&mut current, outer);
                // every node stands for at least one atom, so the atom bound also bounds the tree
                if closed.nodes.is_empty() {
                    return Err(BalanceError::malformed_formula(formula, "empty group ()"));
                }
                current.atoms += closed.atoms;
                if current.atoms > MAX_EXPANDED_ATOMS {
                    return Err(BalanceError::malformed_formula(
                        formula,
                        format!("expands to more than {} atoms", MAX_EXPANDED_ATOMS),
                    ));
                }
                current.nodes.push(Node::Group(closed.nodes));
            }
        }
    }
    if !stack.is_empty() {
        return Err(BalanceError::unbalanced_parentheses(
            formula,
            format!("{} '(' never closed", stack.len()),
        ));
    }
    debug!("formula {} expands to {} atoms", formula, current.atoms);
    Ok(current.nodes)
}

/// Depth-first flattening of the tree into a plain atom sequence, multiplicity preserved
pub fn flatten(nodes: &[Node]) -> Vec<ElementSymbol> {
    let mut atoms = Vec::new();
    let mut stack = vec![nodes.iter()];
    loop {
        let next = match stack.last_mut() {
            Some(level) => level.next(),
            None => break,
        };
        match next {
            Some(Node::Atom(element)) => atoms.push(*element),
            Some(Node::Group(inner)) => stack.push(inner.iter()),
            None => {
                stack.pop();
            }
        }
    }
    atoms
}

/// Atomic composition of one formula. Elements keep the order in which they first
/// appear in the formula; comparison ignores that order.
#[derive(Debug, Clone, Default)]
pub struct FormulaCount {
    counts: Vec<(ElementSymbol, usize)>,
}

impl FormulaCount {
    /// counts occurrences of every symbol in a flat atom sequence
    pub fn tally(atoms: &[ElementSymbol]) -> Self {
        let mut counts: Vec<(ElementSymbol, usize)> = Vec::new();
        for atom in atoms {
            match counts.iter_mut().find(|(element, _)| element == atom) {
                Some((_, n)) => *n += 1,
                None => counts.push((*atom, 1)),
            }
        }
        FormulaCount { counts }
    }

    pub fn get(&self, element: &ElementSymbol) -> Option<usize> {
        self.counts
            .iter()
            .find(|(e, _)| e == element)
            .map(|(_, n)| *n)
    }

    /// count by symbol text, 0 when the element is absent
    pub fn count_of(&self, symbol: &str) -> usize {
        self.counts
            .iter()
            .find(|(e, _)| e.as_str() == symbol)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementSymbol, usize)> + '_ {
        self.counts.iter().copied()
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementSymbol> + '_ {
        self.counts.iter().map(|(e, _)| *e)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total_atoms(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// expands the counts back into a flat atom sequence
    pub fn to_atoms(&self) -> Vec<ElementSymbol> {
        self.counts
            .iter()
            .flat_map(|(e, n)| std::iter::repeat(*e).take(*n))
            .collect()
    }

    /// divides every count by the greatest common divisor of all counts
    pub fn reduced(&self) -> Self {
        let divisor = self
            .counts
            .iter()
            .fold(0u64, |acc, (_, n)| gcd(acc, *n as u64)) as usize;
        if divisor <= 1 {
            return self.clone();
        }
        FormulaCount {
            counts: self
                .counts
                .iter()
                .map(|(e, n)| (*e, n / divisor))
                .collect(),
        }
    }

    pub fn molar_mass(&self) -> f64 {
        self.counts
            .iter()
            .map(|(e, n)| e.atomic_mass() * *n as f64)
            .sum()
    }

    pub fn to_hash_map(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(e, n)| (e.as_str().to_string(), *n))
            .collect()
    }
}

impl PartialEq for FormulaCount {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(e, n)| other.get(&e) == Some(n))
    }
}

impl Eq for FormulaCount {}

impl fmt::Display for FormulaCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(e, n)| format!("{}:{}", e, n))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

// Function to parse a chemical formula and return its element counts
pub fn parse_formula(formula: &str) -> Result<FormulaCount, BalanceError> {
    let formula = formula.trim();
    let nodes = parse_nodes(formula)?;
    let counts = FormulaCount::tally(&flatten(&nodes));
    debug!("parsed formula {} => {}", formula, counts);
    Ok(counts)
}

/// Same as `parse_formula`, reduced to one formula unit (empirical formula),
/// e.g. Ca5Cl10 => {Ca:1, Cl:2}
pub fn parse_formula_reduced(formula: &str) -> Result<FormulaCount, BalanceError> {
    Ok(parse_formula(formula)?.reduced())
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, FormulaCount), BalanceError> {
    let counts = parse_formula(formula)?;
    Ok((counts.molar_mass(), counts))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
) -> Result<Vec<f64>, BalanceError> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula).map(|(mass, _)| mass))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(s, n)| (s.to_string(), *n)).collect()
    }

    #[test]
    fn test_parse_formula() {
        assert_eq!(
            parse_formula("C6H8O6").unwrap().to_hash_map(),
            counts(&[("C", 6), ("H", 8), ("O", 6)])
        );
        assert_eq!(
            parse_formula("Na(NO3)2").unwrap().to_hash_map(),
            counts(&[("Na", 1), ("N", 2), ("O", 6)])
        );
        assert_eq!(
            parse_formula("H2O").unwrap().to_hash_map(),
            counts(&[("H", 2), ("O", 1)])
        );
        assert_eq!(
            parse_formula("C5H6OOH").unwrap().to_hash_map(),
            counts(&[("C", 5), ("H", 7), ("O", 2)])
        );
        assert_eq!(
            parse_formula("NaCl").unwrap().to_hash_map(),
            counts(&[("Na", 1), ("Cl", 1)])
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            parse_formula("Ca(OH)2").unwrap().to_hash_map(),
            counts(&[("Ca", 1), ("O", 2), ("H", 2)])
        );
        // (1*3 + 1)*4 carbons, (2*3 + 3)*4 hydrogens
        assert_eq!(
            parse_formula("Si((CH2)3CH3)4").unwrap().to_hash_map(),
            counts(&[("Si", 1), ("C", 16), ("H", 36)])
        );
        assert_eq!(
            parse_formula("Fe2Cd(H2O)3Na").unwrap().to_hash_map(),
            counts(&[("Fe", 2), ("Cd", 1), ("H", 6), ("O", 3), ("Na", 1)])
        );
        assert_eq!(
            parse_formula("K4Fe(CN)6").unwrap().to_hash_map(),
            counts(&[("K", 4), ("Fe", 1), ("C", 6), ("N", 6)])
        );
        assert_eq!(
            parse_formula("((H)2)3").unwrap().to_hash_map(),
            counts(&[("H", 6)])
        );
    }

    #[test]
    fn test_element_order_is_first_appearance() {
        let parsed = parse_formula("HNO3").unwrap();
        let order: Vec<&str> = parsed.elements().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["H", "N", "O"]);
        let parsed = parse_formula("OH(CO)2").unwrap();
        let order: Vec<&str> = parsed.elements().map(|e| e.as_str()).collect();
        assert_eq!(order, vec!["O", "H", "C"]);
    }

    #[test]
    fn test_tally_round_trip() {
        for formula in ["NaCl", "C6H8O6", "Ca5Cl10", "CH3CH2OH", "U"] {
            let parsed = parse_formula(formula).unwrap();
            assert_eq!(FormulaCount::tally(&parsed.to_atoms()), parsed, "{}", formula);
        }
    }

    #[test]
    fn test_flatten_keeps_depth_first_order() {
        let nodes = parse_nodes("Ca(OH)2").unwrap();
        let flat: Vec<&str> = flatten(&nodes).iter().map(|e| e.as_str()).collect();
        assert_eq!(flat, vec!["Ca", "O", "H", "O", "H"]);
        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[1], Node::Group(_)));
        assert_eq!(nodes[1], nodes[2]);
    }

    #[test]
    fn test_reduce_mode() {
        assert_eq!(
            parse_formula_reduced("Ca5Cl10").unwrap().to_hash_map(),
            counts(&[("Ca", 1), ("Cl", 2)])
        );
        assert_eq!(
            parse_formula_reduced("C6H12O6").unwrap().to_hash_map(),
            counts(&[("C", 1), ("H", 2), ("O", 1)])
        );
        assert_eq!(
            parse_formula_reduced("NaCl").unwrap(),
            parse_formula("NaCl").unwrap()
        );
    }

    #[test]
    fn test_malformed_formulas() {
        assert!(matches!(
            parse_formula("2Na"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("H2(3O)"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("H0"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("H99999999999999999999999"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("((C100)100)1000"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("()"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("H(())2"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("OH)2"),
            Err(BalanceError::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            parse_formula(")"),
            Err(BalanceError::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            parse_formula("Ca(OH"),
            Err(BalanceError::UnbalancedParentheses { .. })
        ));
    }

    #[test]
    fn test_repeated_empty_group_is_rejected_before_expansion() {
        assert!(matches!(
            parse_formula("()5"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_nodes("H()5000000"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        assert!(matches!(
            parse_formula("()1000000000000000000"),
            Err(BalanceError::MalformedFormula { .. })
        ));
        // the largest accepted expansion stays within the atom bound in nodes too
        let nodes = parse_nodes("H1000000").unwrap();
        assert_eq!(nodes.len(), MAX_EXPANDED_ATOMS);
        assert!(parse_nodes("H1000001").is_err());
    }

    #[test]
    fn test_invalid_characters_and_elements() {
        assert_eq!(
            parse_formula("H2O+"),
            Err(BalanceError::InvalidCharacter {
                character: '+',
                position: 3,
                formula: "H2O+".to_string()
            })
        );
        assert!(matches!(
            parse_formula("h2o"),
            Err(BalanceError::InvalidCharacter { character: 'h', .. })
        ));
        assert!(matches!(
            parse_formula("Ca (OH)2"),
            Err(BalanceError::InvalidCharacter { character: ' ', .. })
        ));
        assert_eq!(
            parse_formula("C6H5Me"),
            Err(BalanceError::UnknownElement {
                symbol: "Me".to_string(),
                formula: "C6H5Me".to_string()
            })
        );
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, _) = calculate_molar_mass("H2O").unwrap();
        assert!((molar_mass - 18.015).abs() < 1e-2);
        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert!((molar_mass - 58.44).abs() < 1e-2);
        let (molar_mass, composition) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert!((molar_mass - 164.088).abs() < 1e-2);
        assert_eq!(composition.count_of("O"), 6);
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let expected = [18.015, 58.44, 176.12, 164.088];
        let calculated =
            calculate_molar_mass_of_vector_of_subs(&["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"])
                .unwrap();
        for (calculated, expected) in calculated.iter().zip(expected) {
            assert!((calculated - expected).abs() < 1e-2);
        }
        assert!(calculate_molar_mass_of_vector_of_subs(&["H2O", "Xy"]).is_err());
    }
}
