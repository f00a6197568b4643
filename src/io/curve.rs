//! Read/write distribution curve JSON files.
//!
//! Curve JSON is the "portable" representation of a charted income distribution:
//! - the log-normal parameters it was evaluated with
//! - an optional qualifying-income threshold
//! - the sampled grid (income, density, cumulative)
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, DistributionCurve};
use crate::error::{AppError, Result};
use crate::models::IncomeDistribution;

/// Build the portable curve document.
pub fn curve_file(dist: &IncomeDistribution, grid: DistributionCurve, threshold: Option<f64>) -> CurveFile {
    CurveFile {
        tool: "afford".to_string(),
        generated: chrono::Utc::now(),
        mu: dist.mu(),
        sigma: dist.sigma(),
        threshold,
        grid,
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::io(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid curve JSON: {e}")))?;

    let grid = &curve.grid;
    if grid.density.len() != grid.income.len() || grid.cumulative.len() != grid.income.len() {
        return Err(AppError::io(format!(
            "Invalid curve JSON: grid lengths differ (income={}, density={}, cumulative={}).",
            grid.income.len(),
            grid.density.len(),
            grid.cumulative.len()
        )));
    }
    Ok(curve)
}
