//! Affordability engine: the function-call surface the front-ends use.
//!
//! `Calculator` borrows an immutable [`AffordConfig`] and combines the mortgage
//! model, the income distribution and the region table. It holds no mutable
//! state, so one instance can be shared freely.

use crate::config::AffordConfig;
use crate::domain::{
    AffordabilityQuery, AffordabilityResult, ComparisonRow, DistributionCurve, IncomeBandEstimate,
    PopulationEstimate, RegionRule,
};
use crate::error::Result;
use crate::math::linspace;
use crate::models::qualify;

pub mod comparator;
pub mod population;

pub use comparator::{CompareOptions, compare_regions};

/// Default chart range for income curves.
pub const CURVE_MIN_INCOME: f64 = 1.0;
pub const CURVE_MAX_INCOME: f64 = 400_000.0;
pub const CURVE_POINTS: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct Calculator<'a> {
    config: &'a AffordConfig,
}

impl<'a> Calculator<'a> {
    pub fn new(config: &'a AffordConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a AffordConfig {
        self.config
    }

    /// Region ids in table order.
    pub fn list_regions(&self) -> Vec<&'a str> {
        self.config.regions.ids()
    }

    pub fn region_rule(&self, id: &str) -> Result<&'a RegionRule> {
        self.config.regions.get(id)
    }

    /// Minimum income and down payment for `price` in `region_id`.
    pub fn compute_affordability(&self, price: f64, region_id: &str, first_time_buyer: bool) -> Result<AffordabilityResult> {
        let rule = self.region_rule(region_id)?;
        let query = AffordabilityQuery::new(price, rule.clone(), first_time_buyer)
            .with_amortization(self.config.amortization_years);
        evaluate(&query)
    }

    /// How much of `region_id`'s population earns at least `required_income`.
    pub fn compute_population_estimate(&self, required_income: f64, region_id: &str) -> Result<PopulationEstimate> {
        let rule = self.region_rule(region_id)?;
        population::estimate(required_income, &self.config.distribution, rule.population)
    }

    /// How much of `region_id`'s population earns between `lower` and `upper`.
    pub fn estimate_income_band(&self, lower: f64, upper: f64, region_id: &str) -> Result<IncomeBandEstimate> {
        let rule = self.region_rule(region_id)?;
        population::estimate_band(lower, upper, &self.config.distribution, rule.population)
    }

    /// One row per configured region at `price`, using first-time-buyer down payments.
    pub fn compare_all_regions(&self, price: f64) -> Result<Vec<ComparisonRow>> {
        self.compare_regions_with(price, true)
    }

    pub fn compare_regions_with(&self, price: f64, first_time_buyer: bool) -> Result<Vec<ComparisonRow>> {
        compare_regions(
            self.config.regions.rules(),
            &self.config.distribution,
            CompareOptions {
                price,
                first_time_buyer,
                amortization_years: self.config.amortization_years,
            },
        )
    }

    /// Density and cumulative values at each of `xs`.
    pub fn distribution_curve(&self, xs: &[f64]) -> Result<DistributionCurve> {
        self.config.distribution.curve(xs)
    }

    /// Evenly spaced income points for charting.
    pub fn income_grid(&self, min: f64, max: f64, points: usize) -> Result<Vec<f64>> {
        linspace(min, max, points)
    }
}

/// Evaluate a fully specified query.
pub fn evaluate(query: &AffordabilityQuery) -> Result<AffordabilityResult> {
    qualify(
        query.price,
        query.rule.down_payment_fraction(query.first_time_buyer),
        query.rule.rate,
        query.amortization_years,
    )
}
