//! Null space of the stoichiometric matrix and its conversion into integer coefficients.
//!
//! The null space is computed from the singular value decomposition. A balanceable
//! equation has exactly one basis vector; that vector is scaled so that its smallest
//! entry is 1 and then made integral, either by a bounded multiplier search or through
//! continued fraction approximations of every entry.
use crate::Stoichiometry::balance_errors::BalanceError;
use crate::settings::{BalancerConfig, RationalizationStrategy};
use log::debug;
use nalgebra::{DMatrix, DVector};

pub(crate) fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Orthonormal basis of {x : matrix * x = 0}.
///
/// The matrix is padded with zero rows up to a square shape so that the SVD yields a
/// full set of right singular vectors. A singular value counts as zero when it is below
/// `tolerance * max(1, max(s))` or below the machine precision bound
/// `max(s) * eps * max(rows, cols)`.
pub fn null_space(matrix: &DMatrix<f64>, tolerance: f64) -> Vec<DVector<f64>> {
    let (nrows, ncols) = matrix.shape();
    if nrows == 0 || ncols == 0 {
        return Vec::new();
    }
    let padded = matrix.clone().resize_vertically(nrows.max(ncols), 0.0);
    let svd = padded.svd(false, true);
    let Some(v_t) = svd.v_t else {
        return Vec::new();
    };
    let singular_values = svd.singular_values;
    let largest = singular_values.max();
    let rank_tolerance =
        (tolerance * largest.max(1.0)).max(largest * f64::EPSILON * nrows.max(ncols) as f64);
    debug!("singular values: {}", singular_values.transpose());

    singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| **s <= rank_tolerance)
        .map(|(i, _)| v_t.row(i).transpose())
        .collect()
}

/// Flips the sign so the entries trend positive and divides by the smallest entry.
pub fn scale_by_minimum(
    vector: &DVector<f64>,
    tolerance: f64,
) -> Result<DVector<f64>, BalanceError> {
    let oriented = if vector.sum() < 0.0 {
        vector * -1.0
    } else {
        vector.clone()
    };
    let (position, minimum) = oriented
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .ok_or_else(|| BalanceError::VerificationFailed("empty solution vector".to_string()))?;
    if !(minimum > tolerance) {
        return Err(BalanceError::VerificationFailed(format!(
            "species {} would need a non-positive coefficient",
            position + 1
        )));
    }
    Ok(oriented / minimum)
}

/// Smallest k in 1..=bound such that k * vector is integral within tolerance
pub fn multiplier_search(
    vector: &DVector<f64>,
    tolerance: f64,
    bound: u64,
) -> Result<DVector<f64>, BalanceError> {
    for k in 1..=bound {
        let scaled = vector * k as f64;
        if scaled.iter().all(|x| (x - x.round()).abs() < tolerance) {
            debug!("integer multiplier found: {}", k);
            return Ok(scaled);
        }
    }
    Err(BalanceError::NoIntegerSolutionFound { bound })
}

/// Best fraction p/q with q <= max_denominator and |x - p/q| < tolerance, from the
/// convergents of the continued fraction of a positive x.
pub fn rational_approximation(
    x: f64,
    tolerance: f64,
    max_denominator: u64,
) -> Option<(u64, u64)> {
    if !(x.is_finite() && x >= 0.0) {
        return None;
    }
    // convergents h/k, seeded with h_-1/k_-1 = 1/0 and h_-2/k_-2 = 0/1
    let (mut h_prev, mut h) = (0u64, 1u64);
    let (mut k_prev, mut k) = (1u64, 0u64);
    let mut remainder = x;
    for _ in 0..64 {
        if remainder > u64::MAX as f64 {
            return None;
        }
        let a = remainder.floor() as u64;
        let h_next = a.checked_mul(h)?.checked_add(h_prev)?;
        let k_next = a.checked_mul(k)?.checked_add(k_prev)?;
        if k_next > max_denominator {
            return None;
        }
        (h_prev, h) = (h, h_next);
        (k_prev, k) = (k, k_next);
        if (x - h as f64 / k as f64).abs() < tolerance {
            return Some((h, k));
        }
        let fraction = remainder - remainder.floor();
        if fraction < f64::EPSILON {
            return None;
        }
        remainder = 1.0 / fraction;
    }
    None
}

/// Scales the vector by the LCM of the denominators of its rational approximations
pub fn continued_fraction_scaling(
    vector: &DVector<f64>,
    tolerance: f64,
    max_denominator: u64,
) -> Result<DVector<f64>, BalanceError> {
    let not_found = BalanceError::NoIntegerSolutionFound {
        bound: max_denominator,
    };
    let mut common = 1u64;
    for &x in vector.iter() {
        let (_, denominator) =
            rational_approximation(x, tolerance, max_denominator).ok_or(not_found.clone())?;
        common = lcm(common, denominator).ok_or(not_found.clone())?;
    }
    debug!("common denominator: {}", common);
    Ok(vector * common as f64)
}

/// Rounds the scaled vector and checks it is a positive integer solution of the system.
pub fn verify_integer_solution(
    matrix: &DMatrix<f64>,
    scaled: &DVector<f64>,
    tolerance: f64,
) -> Result<Vec<u64>, BalanceError> {
    let mut coefficients = Vec::with_capacity(scaled.len());
    for (j, x) in scaled.iter().enumerate() {
        let rounded = x.round();
        if !(rounded >= 1.0 && rounded < u64::MAX as f64) {
            return Err(BalanceError::VerificationFailed(format!(
                "coefficient of species {} is {}, not a positive integer",
                j + 1,
                x
            )));
        }
        coefficients.push(rounded as u64);
    }
    let as_float =
        DVector::from_iterator(coefficients.len(), coefficients.iter().map(|&c| c as f64));
    let residual = matrix * as_float;
    if let Some((i, r)) = residual.iter().enumerate().find(|(_, r)| !(r.abs() <= tolerance)) {
        return Err(BalanceError::VerificationFailed(format!(
            "element {} is not conserved (residual {})",
            i + 1,
            r
        )));
    }
    Ok(coefficients)
}

/// Solves matrix * x = 0 for the smallest positive integer x.
pub fn solve_coefficients(
    matrix: &DMatrix<f64>,
    config: &BalancerConfig,
) -> Result<Vec<u64>, BalanceError> {
    if matrix.nrows() == 0 {
        return Err(BalanceError::Unbalanceable);
    }
    let mut basis = null_space(matrix, config.tolerance);
    match basis.len() {
        0 => return Err(BalanceError::Unbalanceable),
        1 => {}
        dimension => return Err(BalanceError::AmbiguousBalance { dimension }),
    }
    let vector = basis.remove(0);
    let scaled = scale_by_minimum(&vector, config.tolerance)?;
    let integral = match config.strategy {
        RationalizationStrategy::MultiplierSearch => {
            multiplier_search(&scaled, config.tolerance, config.max_multiplier)?
        }
        RationalizationStrategy::ContinuedFraction => {
            continued_fraction_scaling(&scaled, config.tolerance, config.max_denominator)?
        }
    };
    verify_integer_solution(matrix, &integral, config.tolerance)
}
