//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - income density: `-` line
//! - qualifying income threshold: `|` column

use crate::domain::{CurveFile, DistributionCurve};
use crate::report::fmt_money;

/// Render the income density with an optional threshold marker.
pub fn render_distribution_plot(
    curve: &DistributionCurve,
    threshold: Option<f64>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = income_range(curve) else {
        return "Plot: no data\n".to_string();
    };
    let y_max = curve.max_density();
    let (y_min, y_max) = if y_max > 0.0 { pad_range(0.0, y_max, 0.05) } else { (0.0, 1.0) };

    let mut grid = vec![vec![' '; width]; height];
    let points: Vec<(f64, f64)> = curve.density_points().collect();
    draw_curve(&mut grid, &points, x_min, x_max, y_min, y_max);

    // Threshold goes on top of empty cells only, so the curve stays readable.
    if let Some(t) = threshold.filter(|t| t.is_finite() && (x_min..=x_max).contains(t)) {
        let x = map_x(t, x_min, x_max, width);
        for row in grid.iter_mut() {
            if row[x] == ' ' {
                row[x] = '|';
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: income=[{}, {}] | threshold={}\n",
        fmt_money(x_min),
        fmt_money(x_max),
        threshold.map(fmt_money).unwrap_or_else(|| "-".to_string())
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render a plot from a saved curve JSON file.
pub fn render_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_distribution_plot(&curve.grid, curve.threshold, width, height)
}

fn income_range(curve: &DistributionCurve) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in &curve.income {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, '-');
        } else {
            grid[yy][xx] = '-';
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tent() -> DistributionCurve {
        DistributionCurve {
            income: vec![1.0, 2.0, 3.0],
            density: vec![0.0, 1.0, 0.0],
            cumulative: vec![0.0, 0.5, 1.0],
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let txt = render_distribution_plot(&tent(), None, 10, 5);
        let expected = concat!(
            "Plot: income=[$1, $3] | threshold=-\n",
            "     -    \n",
            "    - -   \n",
            "  --   -  \n",
            " -      - \n",
            "-        -\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn threshold_fills_empty_cells_only() {
        let txt = render_distribution_plot(&tent(), Some(2.5), 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        // x = round(0.75 * 9) = 7
        for row in &rows {
            let ch = row.chars().nth(7).unwrap();
            assert!(ch == '|' || ch == '-', "row {row:?}");
        }
        assert!(txt.starts_with("Plot: income=[$1, $3] | threshold=$3\n"));
    }

    #[test]
    fn threshold_outside_range_is_skipped() {
        let txt = render_distribution_plot(&tent(), Some(10.0), 10, 5);
        assert!(!txt.lines().skip(1).any(|l| l.contains('|')));
    }

    #[test]
    fn empty_curve_has_no_plot() {
        let empty = DistributionCurve {
            income: Vec::new(),
            density: Vec::new(),
            cumulative: Vec::new(),
        };
        assert_eq!(render_distribution_plot(&empty, None, 20, 5), "Plot: no data\n");
    }
}
