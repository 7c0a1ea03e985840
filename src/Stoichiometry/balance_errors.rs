use thiserror::Error;

/// Everything that can go wrong between the equation text and the balanced result.
/// Every stage of the pipeline stops at the first error and hands it up unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("Malformed equation: {0}")]
    MalformedEquation(String),
    #[error("Invalid character '{character}' at position {position} in formula '{formula}'")]
    InvalidCharacter {
        character: char,
        position: usize,
        formula: String,
    },
    #[error("'{symbol}' is not a valid element (formula '{formula}')")]
    UnknownElement { symbol: String, formula: String },
    #[error("Malformed formula '{formula}': {reason}")]
    MalformedFormula { formula: String, reason: String },
    #[error("Unbalanced parentheses in formula '{formula}': {reason}")]
    UnbalancedParentheses { formula: String, reason: String },
    #[error("The reaction cannot be balanced: no nontrivial solution conserves every element")]
    Unbalanceable,
    #[error(
        "The reaction can be balanced in multiple ways: {dimension} independent solutions exist"
    )]
    AmbiguousBalance { dimension: usize },
    #[error("Could not find integer coefficients within the search bound {bound}")]
    NoIntegerSolutionFound { bound: u64 },
    #[error("Integer coefficients failed verification: {0}")]
    VerificationFailed(String),
}

impl BalanceError {
    pub(crate) fn malformed_formula(formula: &str, reason: impl Into<String>) -> Self {
        BalanceError::MalformedFormula {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unbalanced_parentheses(formula: &str, reason: impl Into<String>) -> Self {
        BalanceError::UnbalancedParentheses {
            formula: formula.to_string(),
            reason: reason.into(),
        }
    }

    /// short name of the failure kind, as listed in the error table of the docs
    pub fn kind(&self) -> &'static str {
        match self {
            BalanceError::MalformedEquation(_) => "MalformedEquation",
            BalanceError::InvalidCharacter { .. } => "InvalidCharacter",
            BalanceError::UnknownElement { .. } => "UnknownElement",
            BalanceError::MalformedFormula { .. } => "MalformedFormula",
            BalanceError::UnbalancedParentheses { .. } => "UnbalancedParentheses",
            BalanceError::Unbalanceable => "Unbalanceable",
            BalanceError::AmbiguousBalance { .. } => "AmbiguousBalance",
            BalanceError::NoIntegerSolutionFound { .. } => "NoIntegerSolutionFound",
            BalanceError::VerificationFailed(_) => "VerificationFailed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_detail() {
        let e = BalanceError::InvalidCharacter {
            character: '$',
            position: 2,
            formula: "H2$".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid character '$' at position 2 in formula 'H2$'"
        );
        assert_eq!(e.kind(), "InvalidCharacter");

        let e = BalanceError::AmbiguousBalance { dimension: 2 };
        assert!(e.to_string().contains("multiple ways"));
        assert_eq!(
            BalanceError::malformed_formula("2Na", "no atom to multiply").kind(),
            "MalformedFormula"
        );
    }
}
