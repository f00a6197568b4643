//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - loaded from a regions JSON file
//! - exported to JSON/CSV
//! - handed to any front-end (CLI, TUI) without conversion

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Maximum share of gross income that housing costs may consume when qualifying.
pub const HOUSING_RATIO: f64 = 0.28;

/// Amortization period used when none is configured.
pub const DEFAULT_AMORTIZATION_YEARS: u32 = 25;

/// Mortgage rules for a single region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRule {
    pub id: String,
    /// Minimum down payment as a fraction of the purchase price.
    pub down_payment: f64,
    /// Down payment fraction available to first-time buyers.
    pub first_time: f64,
    /// Annual mortgage interest rate (0.045 = 4.5%).
    pub rate: f64,
    /// Reference population the affordability fraction is scaled by.
    pub population: u64,
    /// Buyer-incentive multiplier.
    ///
    /// Carried through for display; no computation applies it yet.
    #[serde(default = "default_incentive")]
    pub incentive: f64,
}

fn default_incentive() -> f64 {
    1.0
}

impl RegionRule {
    pub fn new(id: &str, down_payment: f64, first_time: f64, rate: f64, population: u64, incentive: f64) -> Self {
        Self {
            id: id.to_string(),
            down_payment,
            first_time,
            rate,
            population,
            incentive,
        }
    }

    /// Down payment fraction for the given buyer profile.
    pub fn down_payment_fraction(&self, first_time_buyer: bool) -> f64 {
        if first_time_buyer { self.first_time } else { self.down_payment }
    }

    /// Check the invariants every rule must satisfy before it is used.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::config("region id must not be empty."));
        }
        check_fraction(&self.id, "down_payment", self.down_payment)?;
        check_fraction(&self.id, "first_time", self.first_time)?;
        check_fraction(&self.id, "rate", self.rate)?;
        if self.population == 0 {
            return Err(AppError::config(format!("{}: population must be > 0.", self.id)));
        }
        if !(self.incentive.is_finite() && self.incentive >= 0.0) {
            return Err(AppError::config(format!(
                "{}: incentive must be finite and >= 0 (got {}).",
                self.id, self.incentive
            )));
        }
        Ok(())
    }
}

fn check_fraction(id: &str, field: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
        return Err(AppError::config(format!(
            "{id}: {field} must be a fraction in [0, 1] (got {value})."
        )));
    }
    Ok(())
}

/// One affordability question: a price under a region's rules.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityQuery {
    pub price: f64,
    pub rule: RegionRule,
    pub first_time_buyer: bool,
    pub amortization_years: u32,
}

impl AffordabilityQuery {
    pub fn new(price: f64, rule: RegionRule, first_time_buyer: bool) -> Self {
        Self {
            price,
            rule,
            first_time_buyer,
            amortization_years: DEFAULT_AMORTIZATION_YEARS,
        }
    }

    pub fn with_amortization(mut self, years: u32) -> Self {
        self.amortization_years = years;
        self
    }
}

/// Mortgage qualification outcome for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    /// Minimum gross annual income needed to qualify.
    pub minimum_income: f64,
    /// Cash required up front (never more than the price).
    pub down_payment: f64,
    pub down_payment_fraction: f64,
    pub loan: f64,
    pub monthly_payment: f64,
    pub annual_rate: f64,
    pub amortization_years: u32,
}

impl AffordabilityResult {
    /// True when the purchase needs no mortgage at all.
    pub fn is_cash_purchase(&self) -> bool {
        self.loan <= 0.0
    }
}

/// Share of a population whose income clears a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationEstimate {
    pub required_income: f64,
    /// Probability mass above `required_income`, in `[0, 1]`.
    pub fraction: f64,
    /// `fraction × population`, kept at full precision.
    pub count: f64,
}

impl PopulationEstimate {
    /// Count rounded to the nearest whole person, for display.
    pub fn rounded_count(&self) -> u64 {
        self.count.round().max(0.0) as u64
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Share of a population whose income falls inside `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeBandEstimate {
    pub lower: f64,
    pub upper: f64,
    pub fraction: f64,
    pub count: f64,
}

impl IncomeBandEstimate {
    pub fn rounded_count(&self) -> u64 {
        self.count.round().max(0.0) as u64
    }
}

/// Per-region figures produced by the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionAffordability {
    pub minimum_income: f64,
    pub down_payment: f64,
    pub fraction: f64,
    pub count: f64,
}

/// One comparator row: the region id plus its figures or the error that prevented them.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub region: String,
    pub outcome: std::result::Result<RegionAffordability, AppError>,
}

impl ComparisonRow {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Density and cumulative values sampled at a set of income points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionCurve {
    pub income: Vec<f64>,
    pub density: Vec<f64>,
    pub cumulative: Vec<f64>,
}

impl DistributionCurve {
    pub fn len(&self) -> usize {
        self.income.len()
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
    }

    /// Iterate `(income, density)` pairs.
    pub fn density_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.income.iter().copied().zip(self.density.iter().copied())
    }

    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

/// A saved distribution curve (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: chrono::DateTime<chrono::Utc>,
    pub mu: f64,
    pub sigma: f64,
    /// Income threshold to mark on plots, if the curve was exported for a query.
    #[serde(default)]
    pub threshold: Option<f64>,
    pub grid: DistributionCurve,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ontario() -> RegionRule {
        RegionRule::new("Ontario", 0.05, 0.05, 0.047, 15_000_000, 0.93)
    }

    #[test]
    fn valid_rule_passes() {
        assert!(ontario().validate().is_ok());
    }

    #[test]
    fn fraction_out_of_range_is_config_error() {
        let mut rule = ontario();
        rule.first_time = 1.5;
        let err = rule.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("first_time"));
    }

    #[test]
    fn zero_population_is_rejected() {
        let mut rule = ontario();
        rule.population = 0;
        assert!(rule.validate().is_err());
    }

    #[test]
    fn first_time_flag_selects_fraction() {
        let rule = RegionRule::new("Quebec", 0.05, 0.03, 0.044, 9_000_000, 1.0);
        assert_eq!(rule.down_payment_fraction(true), 0.03);
        assert_eq!(rule.down_payment_fraction(false), 0.05);
    }

    #[test]
    fn incentive_defaults_when_missing_from_json() {
        let json = r#"{"id":"Yukon","down_payment":0.05,"first_time":0.05,"rate":0.05,"population":45000}"#;
        let rule: RegionRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.incentive, 1.0);
    }

    #[test]
    fn rounded_count_rounds_to_nearest_person() {
        let est = PopulationEstimate {
            required_income: 1.0,
            fraction: 0.5,
            count: 10.5,
        };
        assert_eq!(est.rounded_count(), 11);
        assert!((est.percent() - 50.0).abs() < 1e-12);
    }
}
