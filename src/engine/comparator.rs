//! Side-by-side affordability for every region in a table.
//!
//! Rows are independent, so they are computed in parallel with rayon; `collect`
//! on an indexed parallel iterator keeps table order. A rule that fails
//! validation or computation produces an error row instead of aborting the run.

use log::warn;
use rayon::prelude::*;

use crate::domain::{ComparisonRow, RegionAffordability, RegionRule};
use crate::engine::population;
use crate::error::{AppError, Result};
use crate::models::{IncomeDistribution, qualify};

/// Options shared by every row of a comparison.
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions {
    pub price: f64,
    pub first_time_buyer: bool,
    pub amortization_years: u32,
}

/// Compare `rules` at a fixed price, one row per rule in input order.
pub fn compare_regions(
    rules: &[RegionRule],
    dist: &IncomeDistribution,
    options: CompareOptions,
) -> Result<Vec<ComparisonRow>> {
    if !(options.price.is_finite() && options.price > 0.0) {
        return Err(AppError::invalid(format!(
            "purchase price must be finite and > 0 (got {}).",
            options.price
        )));
    }

    let rows: Vec<ComparisonRow> = rules
        .par_iter()
        .map(|rule| ComparisonRow {
            region: rule.id.clone(),
            outcome: region_row(rule, dist, options),
        })
        .collect();

    for row in &rows {
        if let Err(err) = &row.outcome {
            warn!("comparison row for '{}' failed: {err}", row.region);
        }
    }

    Ok(rows)
}

fn region_row(
    rule: &RegionRule,
    dist: &IncomeDistribution,
    options: CompareOptions,
) -> std::result::Result<RegionAffordability, AppError> {
    rule.validate()?;
    let fraction = rule.down_payment_fraction(options.first_time_buyer);
    let result = qualify(options.price, fraction, rule.rate, options.amortization_years)?;
    let estimate = population::estimate(result.minimum_income, dist, rule.population)?;

    Ok(RegionAffordability {
        minimum_income: result.minimum_income,
        down_payment: result.down_payment,
        fraction: estimate.fraction,
        count: estimate.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RegionTable;

    fn options(price: f64) -> CompareOptions {
        CompareOptions {
            price,
            first_time_buyer: true,
            amortization_years: 25,
        }
    }

    #[test]
    fn one_row_per_region_in_table_order() {
        let table = RegionTable::canada();
        let rows = compare_regions(table.rules(), &IncomeDistribution::default(), options(800_000.0)).unwrap();

        let ids: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(ids, table.ids());
        assert!(rows.iter().all(ComparisonRow::is_ok));
    }

    #[test]
    fn rows_match_single_region_computation() {
        let table = RegionTable::canada();
        let dist = IncomeDistribution::default();
        let rows = compare_regions(table.rules(), &dist, options(800_000.0)).unwrap();

        let national = rows[0].outcome.as_ref().unwrap();
        assert!((national.minimum_income - 181_042.578_536).abs() < 1e-3);
        assert!((national.fraction - 0.040_608_2).abs() < 1e-6);
        assert!((national.count - 812_164.6).abs() < 25.0);
    }

    #[test]
    fn lower_rate_needs_less_income() {
        let table = RegionTable::canada();
        let rows = compare_regions(table.rules(), &IncomeDistribution::default(), options(600_000.0)).unwrap();
        let income = |id: &str| {
            rows.iter()
                .find(|r| r.region == id)
                .and_then(|r| r.outcome.as_ref().ok())
                .map(|r| r.minimum_income)
                .unwrap()
        };
        // Manitoba 4.2% vs BC 4.9%, same down payment.
        assert!(income("Manitoba") < income("BC"));
    }

    #[test]
    fn bad_rule_does_not_abort_the_others() {
        let mut rules = RegionTable::canada().rules().to_vec();
        rules[1].rate = -0.5;
        rules[3].population = 0;

        let rows = compare_regions(&rules, &IncomeDistribution::default(), options(500_000.0)).unwrap();
        assert_eq!(rows.len(), rules.len());
        assert!(rows[1].outcome.is_err());
        assert!(rows[3].outcome.is_err());
        assert_eq!(rows.iter().filter(|r| r.is_ok()).count(), rules.len() - 2);
        assert_eq!(rows[1].region, "Ontario");
    }

    #[test]
    fn invalid_price_fails_up_front() {
        let table = RegionTable::canada();
        let err = compare_regions(table.rules(), &IncomeDistribution::default(), options(0.0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn repeat_buyer_uses_standard_down_payment() {
        let table = RegionTable::canada();
        let dist = IncomeDistribution::default();
        let mut opts = options(400_000.0);
        let first = compare_regions(table.rules(), &dist, opts).unwrap();
        opts.first_time_buyer = false;
        let repeat = compare_regions(table.rules(), &dist, opts).unwrap();

        let quebec = table.index_of("Quebec").unwrap();
        let dp = |rows: &[ComparisonRow]| rows[quebec].outcome.as_ref().unwrap().down_payment;
        assert!((dp(&first) - 12_000.0).abs() < 1e-9);
        assert!((dp(&repeat) - 20_000.0).abs() < 1e-9);
    }
}
