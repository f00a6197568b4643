//! Formatted terminal output for results, comparisons and the region table.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized

use crate::config::AffordConfig;
use crate::domain::{
    AffordabilityResult, ComparisonRow, HOUSING_RATIO, IncomeBandEstimate, PopulationEstimate, RegionRule,
};

/// Format the single-region affordability summary.
pub fn format_affordability(
    price: f64,
    rule: &RegionRule,
    first_time_buyer: bool,
    result: &AffordabilityResult,
    estimate: &PopulationEstimate,
) -> String {
    let mut out = String::new();

    out.push_str("=== afford - Canada Home Affordability ===\n");
    out.push_str(&format!(
        "Region: {} | buyer: {}\n",
        rule.id,
        if first_time_buyer { "first-time" } else { "repeat" }
    ));
    out.push_str(&format!(
        "Price: {} | down payment {:.1}% | rate {:.2}%\n",
        fmt_money(price),
        result.down_payment_fraction * 100.0,
        result.annual_rate * 100.0
    ));
    out.push('\n');

    out.push_str(&format!("Down payment required : {}\n", fmt_money(result.down_payment)));
    if result.is_cash_purchase() {
        out.push_str("Mortgage principal    : none (cash purchase)\n");
    } else {
        out.push_str(&format!("Mortgage principal    : {}\n", fmt_money(result.loan)));
        out.push_str(&format!("Monthly payment       : {}\n", fmt_money(result.monthly_payment)));
    }
    out.push_str(&format!("Min income needed     : {}\n", fmt_money(result.minimum_income)));
    out.push_str(&format!(
        "Can afford this home  : {} people ({:.1}%)\n",
        fmt_count(estimate.rounded_count()),
        estimate.percent()
    ));
    out.push('\n');
    out.push_str(&format!(
        "Assumptions: {:.0}% housing ratio, {}y amortization.\n",
        HOUSING_RATIO * 100.0,
        result.amortization_years
    ));

    out
}

/// Format the regional comparison table.
pub fn format_comparison(price: f64, rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!("All regions at {}:\n", fmt_money(price)));
    out.push_str(&format!(
        "{:<14} {:>14} {:>14} {:>12} {:>9}\n",
        "region", "min income", "down payment", "can afford", "% of pop"
    ));
    out.push_str(&format!("{:-<14} {:-<14} {:-<14} {:-<12} {:-<9}\n", "", "", "", "", ""));

    for row in rows {
        let line = match &row.outcome {
            Ok(r) => format!(
                "{:<14} {:>14} {:>14} {:>12} {:>8.1}%",
                truncate(&row.region, 14),
                fmt_money(r.minimum_income),
                fmt_money(r.down_payment),
                fmt_count(r.count.round().max(0.0) as u64),
                r.fraction * 100.0
            ),
            Err(err) => format!("{:<14} error: {err}", truncate(&row.region, 14)),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format the region rule table plus distribution settings.
pub fn format_regions(config: &AffordConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>8} {:>11} {:>7} {:>12} {:>10}\n",
        "region", "down %", "1st-time %", "rate %", "population", "incentive"
    ));
    out.push_str(&format!("{:-<14} {:-<8} {:-<11} {:-<7} {:-<12} {:-<10}\n", "", "", "", "", "", ""));
    for rule in config.regions.rules() {
        out.push_str(&format!(
            "{:<14} {:>8.1} {:>11.1} {:>7.2} {:>12} {:>10.2}\n",
            truncate(&rule.id, 14),
            rule.down_payment * 100.0,
            rule.first_time * 100.0,
            rule.rate * 100.0,
            fmt_count(rule.population),
            rule.incentive
        ));
    }
    out.push('\n');
    let dist = &config.distribution;
    out.push_str(&format!(
        "Income model: log-normal mu={:.3} sigma={:.3} (mode {}, median {}, mean {})\n",
        dist.mu(),
        dist.sigma(),
        fmt_money(dist.mode()),
        fmt_money(dist.scale()),
        fmt_money(dist.mean())
    ));
    out.push_str(&format!("Amortization: {} years\n", config.amortization_years));
    out
}

/// Format an income-band population estimate.
pub fn format_band(region: &str, band: &IncomeBandEstimate) -> String {
    format!(
        "{region}: people earning {}-{}: {} ({:.1}%)\n",
        fmt_money(band.lower),
        fmt_money(band.upper),
        fmt_count(band.rounded_count()),
        band.fraction * 100.0
    )
}

/// `$1,234,567` (rounded to whole dollars).
pub fn fmt_money(v: f64) -> String {
    if !v.is_finite() {
        return format!("${v}");
    }
    let rounded = v.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// `1,234,567`.
pub fn fmt_count(v: u64) -> String {
    group_thousands(v)
}

fn group_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegionAffordability;
    use crate::error::AppError;

    #[test]
    fn money_is_grouped() {
        assert_eq!(fmt_money(181_042.58), "$181,043");
        assert_eq!(fmt_money(999.4), "$999");
        assert_eq!(fmt_money(1_000.0), "$1,000");
        assert_eq!(fmt_money(-2_500_000.0), "-$2,500,000");
        assert_eq!(fmt_count(20_000_000), "20,000,000");
        assert_eq!(fmt_count(0), "0");
    }

    #[test]
    fn comparison_shows_error_rows() {
        let rows = vec![
            ComparisonRow {
                region: "Alberta".to_string(),
                outcome: Ok(RegionAffordability {
                    minimum_income: 170_000.0,
                    down_payment: 40_000.0,
                    fraction: 0.05,
                    count: 225_000.0,
                }),
            },
            ComparisonRow {
                region: "Broken".to_string(),
                outcome: Err(AppError::config("Broken: population must be > 0.")),
            },
        ];
        let text = format_comparison(800_000.0, &rows);
        assert!(text.contains("Alberta"));
        assert!(text.contains("$170,000"));
        assert!(text.contains("225,000"));
        assert!(text.contains("5.0%"));
        assert!(text.contains("error: Configuration error: Broken"));
    }

    #[test]
    fn regions_table_lists_every_region() {
        let config = AffordConfig::default();
        let text = format_regions(&config);
        for id in config.regions.ids() {
            assert!(text.contains(id));
        }
        assert!(text.contains("sigma=0.950"));
        assert!(text.contains("mode $14,010"), "{text}");
        assert!(text.contains("median $34,544"));
    }

    #[test]
    fn cash_purchase_omits_the_mortgage() {
        let rule = RegionRule::new("National", 0.2, 1.0, 0.045, 100, 1.0);
        let result = crate::models::qualify(500_000.0, 1.0, 0.045, 25).unwrap();
        let estimate = PopulationEstimate {
            required_income: 0.0,
            fraction: 1.0,
            count: 100.0,
        };
        let text = format_affordability(500_000.0, &rule, true, &result, &estimate);
        assert!(text.contains("none (cash purchase)"));
        assert!(!text.contains("Monthly payment"));
        assert!(text.contains("Min income needed     : $0"));

        let financed = crate::models::qualify(500_000.0, 0.2, 0.045, 25).unwrap();
        let text = format_affordability(500_000.0, &rule, false, &financed, &estimate);
        assert!(text.contains("Monthly payment"));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Newfoundland and Labrador", 8), "Newfoun.");
        assert_eq!(truncate("BC", 8), "BC");
    }
}
