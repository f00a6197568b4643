//! Command-line parsing for the affordability calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the engine and math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::report::SortKey;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "afford", version, about = "Canada Home Affordability Calculator")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Minimum income and population share for one home in one region.
    Afford(AffordArgs),
    /// Compare every configured region at one price.
    Compare(CompareArgs),
    /// List the regional mortgage rules and income model.
    Regions,
    /// How many people earn within an income range.
    Band(BandArgs),
    /// Evaluate the income distribution over a range (optionally export JSON).
    Curve(CurveArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    Tui,
}

/// Configuration flags shared by every subcommand.
#[derive(Debug, Args, Clone, Default)]
pub struct ConfigArgs {
    /// JSON file with region rules (overrides AFFORD_REGIONS).
    #[arg(long, global = true, value_name = "JSON")]
    pub regions: Option<PathBuf>,

    /// Amortization period in years (overrides AFFORD_AMORTIZATION_YEARS).
    #[arg(long, global = true)]
    pub amortization: Option<u32>,
}

impl ConfigArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            regions_file: self.regions.clone(),
            amortization_years: self.amortization,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct AffordArgs {
    /// Purchase price in dollars.
    #[arg(short = 'p', long, default_value_t = 800_000.0)]
    pub price: f64,

    /// Region id (prompted when omitted).
    #[arg(short = 'r', long)]
    pub region: Option<String>,

    /// Use the first-time-buyer down payment.
    #[arg(long)]
    pub first_time: bool,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Purchase price in dollars.
    #[arg(short = 'p', long, default_value_t = 800_000.0)]
    pub price: f64,

    /// Use each region's standard down payment instead of the first-time-buyer one.
    #[arg(long)]
    pub repeat_buyer: bool,

    /// Row ordering.
    #[arg(long, value_enum, default_value_t = SortKey::Table)]
    pub sort: SortKey,

    /// Export rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BandArgs {
    /// Lower income bound (0 includes everyone below the upper bound).
    #[arg(long, default_value_t = 25_000.0)]
    pub min: f64,

    /// Upper income bound.
    #[arg(long, default_value_t = 100_000.0)]
    pub max: f64,

    /// Region id (prompted when omitted).
    #[arg(short = 'r', long)]
    pub region: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    /// Lowest income point.
    #[arg(long, default_value_t = crate::engine::CURVE_MIN_INCOME)]
    pub min: f64,

    /// Highest income point.
    #[arg(long, default_value_t = crate::engine::CURVE_MAX_INCOME)]
    pub max: f64,

    /// Number of evenly spaced points.
    #[arg(long, default_value_t = crate::engine::CURVE_POINTS)]
    pub points: usize,

    /// Income threshold to mark on the plot and store in the export.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Export the curve to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `afford curve --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_afford_flags() {
        let cli = Cli::try_parse_from(["afford", "afford", "-p", "650000", "-r", "BC", "--first-time"]).unwrap();
        let Command::Afford(args) = cli.command else {
            panic!("expected afford");
        };
        assert_eq!(args.price, 650_000.0);
        assert_eq!(args.region.as_deref(), Some("BC"));
        assert!(args.first_time);
    }

    #[test]
    fn global_config_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["afford", "compare", "--amortization", "30", "--sort", "share"]).unwrap();
        assert_eq!(cli.config.amortization, Some(30));
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.sort, SortKey::Share);
        assert!(!args.repeat_buyer);
    }
}
