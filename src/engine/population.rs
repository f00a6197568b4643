//! Population affordability: how many people clear an income threshold.

use crate::domain::{IncomeBandEstimate, PopulationEstimate};
use crate::error::{AppError, Result};
use crate::models::IncomeDistribution;

/// Share and count of `population` whose income is at least `required_income`.
///
/// A zero threshold (cash purchase) is met by everyone.
pub fn estimate(required_income: f64, dist: &IncomeDistribution, population: u64) -> Result<PopulationEstimate> {
    if !(required_income.is_finite() && required_income >= 0.0) {
        return Err(AppError::invalid(format!(
            "required income must be finite and >= 0 (got {required_income})."
        )));
    }

    let fraction = if required_income == 0.0 {
        1.0
    } else {
        1.0 - dist.cumulative(required_income)?
    };

    Ok(PopulationEstimate {
        required_income,
        fraction,
        count: fraction * population as f64,
    })
}

/// Share and count of `population` with income in `[lower, upper]`.
///
/// `lower = 0` includes the whole lower tail.
pub fn estimate_band(lower: f64, upper: f64, dist: &IncomeDistribution, population: u64) -> Result<IncomeBandEstimate> {
    if !(lower.is_finite() && lower >= 0.0) {
        return Err(AppError::invalid(format!("lower income must be finite and >= 0 (got {lower}).")));
    }
    if !(upper.is_finite() && upper > lower) {
        return Err(AppError::invalid(format!(
            "upper income must be finite and above the lower bound (got {lower}..{upper})."
        )));
    }

    let below_lower = if lower == 0.0 { 0.0 } else { dist.cumulative(lower)? };
    let fraction = (dist.cumulative(upper)? - below_lower).max(0.0);

    Ok(IncomeBandEstimate {
        lower,
        upper,
        fraction,
        count: fraction * population as f64,
    })
}
