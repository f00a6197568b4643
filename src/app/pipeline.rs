//! Shared "scenario" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! region lookup -> qualification -> population estimate -> comparison -> chart curve
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use log::debug;

use crate::config::AffordConfig;
use crate::domain::{AffordabilityResult, ComparisonRow, DistributionCurve, PopulationEstimate, RegionRule};
use crate::engine::{CURVE_MAX_INCOME, CURVE_MIN_INCOME, CURVE_POINTS, Calculator};
use crate::error::Result;

/// Inputs of one calculator screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub price: f64,
    pub region: String,
    pub first_time_buyer: bool,
}

/// All computed outputs for a single scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOutput {
    pub rule: RegionRule,
    pub result: AffordabilityResult,
    pub estimate: PopulationEstimate,
    pub comparison: Vec<ComparisonRow>,
    pub curve: DistributionCurve,
}

/// Evaluate a scenario end to end.
pub fn run_scenario(config: &AffordConfig, scenario: &Scenario) -> Result<ScenarioOutput> {
    let calc = Calculator::new(config);

    let rule = calc.region_rule(&scenario.region)?.clone();
    let result = calc.compute_affordability(scenario.price, &rule.id, scenario.first_time_buyer)?;
    let estimate = calc.compute_population_estimate(result.minimum_income, &rule.id)?;
    debug!(
        "{} @ {:.0}: income {:.2}, share {:.4}",
        rule.id, scenario.price, result.minimum_income, estimate.fraction
    );

    let comparison = calc.compare_regions_with(scenario.price, scenario.first_time_buyer)?;

    let xs = calc.income_grid(CURVE_MIN_INCOME, CURVE_MAX_INCOME, CURVE_POINTS)?;
    let curve = calc.distribution_curve(&xs)?;

    Ok(ScenarioOutput {
        rule,
        result,
        estimate,
        comparison,
        curve,
    })
}
