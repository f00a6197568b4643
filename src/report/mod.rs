//! Reporting utilities: comparison ordering and formatted terminal output.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::ComparisonRow;

pub mod format;

pub use format::*;

/// How to order comparison rows for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the region table's order.
    Table,
    /// Lowest required income first.
    Income,
    /// Largest affordable share first.
    Share,
    /// Largest affordable head-count first.
    Count,
}

/// Reorder rows for display. Error rows always sink to the bottom.
///
/// The sort is stable, so ties keep table order.
pub fn sort_rows(rows: &[ComparisonRow], key: SortKey) -> Vec<ComparisonRow> {
    let mut sorted = rows.to_vec();
    if key == SortKey::Table {
        return sorted;
    }

    sorted.sort_by(|a, b| match (&a.outcome, &b.outcome) {
        (Ok(x), Ok(y)) => {
            let ord = match key {
                SortKey::Income => x.minimum_income.partial_cmp(&y.minimum_income),
                SortKey::Share => y.fraction.partial_cmp(&x.fraction),
                SortKey::Count => y.count.partial_cmp(&x.count),
                SortKey::Table => None,
            };
            ord.unwrap_or(std::cmp::Ordering::Equal)
        }
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });
    sorted
}
