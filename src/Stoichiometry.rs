/// Error kinds of the balancing pipeline
pub mod balance_errors;
/// eng
/// Splitting of equation text into reactants and products, and rendering of the balanced
/// equation ("O2 + 2·H2 = 2·H2O"). Exactly one '=' separates the sides,
/// species are joined by '+'.
pub mod equation;
/// Static periodic table: element symbols and standard atomic weights
pub mod elements;
/// Module to calculate the atomic composition and molar mass of a chemical formula.
/// Brackets nest arbitrarily deep and a number after ')' multiplies the whole group.
///
///  # Examples
/// ```
/// use ReBalance::Stoichiometry::formula_parser::{
///     calculate_molar_mass, parse_formula, parse_formula_reduced,
/// };
/// let composition = parse_formula("Ca(OH)2").unwrap();
/// assert_eq!(composition.count_of("O"), 2);
/// let composition = parse_formula("Si((CH2)3CH3)4").unwrap();
/// assert_eq!(composition.count_of("C"), 16);
/// assert_eq!(composition.count_of("H"), 36);
/// let empirical = parse_formula_reduced("Ca5Cl10").unwrap();
/// assert_eq!(empirical.count_of("Cl"), 2);
/// let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// ```
pub mod formula_parser;
/// eng
/// The element composition matrix of an equation: one row per element (first-seen order),
/// one column per species, reactant counts positive and product counts negative.
pub mod stoich_matrix;
/// Null space of the composition matrix (via SVD) and recovery of the smallest positive
/// integer coefficients from it
pub mod null_space;
/// The whole pipeline: equation text in, balanced equation out
///
///  # Examples
/// ```
/// use ReBalance::Stoichiometry::balancer::balance_chemical_reaction;
/// let balanced = balance_chemical_reaction("O2 + H2 = H2O").unwrap();
/// assert_eq!(balanced, "O2 + 2·H2 = 2·H2O");
/// assert!(balance_chemical_reaction("H2O + NO2 = HNO3").is_err());
/// ```
pub mod balancer;
