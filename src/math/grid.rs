//! Income grid generation and numeric integration over a grid.
//!
//! Charts and sanity checks evaluate the income distribution at a finite set of
//! points. Grids are deterministic given the same bounds and step count.

use crate::error::{AppError, Result};

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn linspace(min: f64, max: f64, steps: usize) -> Result<Vec<f64>> {
    check_range(min, max, steps)?;

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps {
        out.push(min + step * i as f64);
    }
    // Pin the endpoint so accumulated rounding never overshoots `max`.
    if let Some(last) = out.last_mut() {
        *last = max;
    }
    Ok(out)
}

/// Trapezoidal integral of `ys` sampled at `xs`.
///
/// `xs` must be sorted ascending and the same length as `ys`.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
        .sum()
}

fn check_range(min: f64, max: f64, steps: usize) -> Result<()> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::invalid(format!(
            "Invalid grid range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::invalid("Grid steps must be >= 2."));
    }
    Ok(())
}
