//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - resolves configuration (flags, environment, defaults)
//! - dispatches to the subcommand handlers

use clap::Parser;
use log::debug;

use crate::cli::{AffordArgs, BandArgs, Command, CompareArgs, CurveArgs, PlotArgs};
use crate::config::AffordConfig;
use crate::engine::Calculator;
use crate::error::{AppError, Result};

pub mod pipeline;

/// Entry point for the `afford` binary.
pub fn run() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // We want `afford` and `afford --regions x.json` to behave like `afford tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let config = AffordConfig::load(&cli.config.overrides())?;
    debug!("resolved configuration: {:?}", config.regions.ids());

    match cli.command {
        Command::Afford(args) => handle_afford(&config, args),
        Command::Compare(args) => handle_compare(&config, args),
        Command::Regions => {
            print!("{}", crate::report::format_regions(&config));
            Ok(())
        }
        Command::Band(args) => handle_band(&config, args),
        Command::Curve(args) => handle_curve(&config, args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui => crate::tui::run(config),
    }
}

fn handle_afford(config: &AffordConfig, args: AffordArgs) -> Result<()> {
    let region = crate::cli::picker::resolve_region(&config.regions, args.region.as_deref())?;
    let scenario = pipeline::Scenario {
        price: args.price,
        region,
        first_time_buyer: args.first_time,
    };
    let out = pipeline::run_scenario(config, &scenario)?;

    if args.json {
        let doc = serde_json::json!({
            "region": out.rule.id,
            "price": scenario.price,
            "first_time_buyer": scenario.first_time_buyer,
            "result": out.result,
            "estimate": out.estimate,
        });
        let text = serde_json::to_string_pretty(&doc)
            .map_err(|e| AppError::io(format!("Failed to encode result JSON: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    print!(
        "{}",
        crate::report::format_affordability(
            scenario.price,
            &out.rule,
            scenario.first_time_buyer,
            &out.result,
            &out.estimate
        )
    );

    if !args.no_plot {
        let plot = crate::plot::render_distribution_plot(
            &out.curve,
            Some(out.result.minimum_income),
            args.width,
            args.height,
        );
        println!("\n{plot}");
    }

    Ok(())
}

fn handle_compare(config: &AffordConfig, args: CompareArgs) -> Result<()> {
    let calc = Calculator::new(config);
    let rows = calc.compare_regions_with(args.price, !args.repeat_buyer)?;
    let sorted = crate::report::sort_rows(&rows, args.sort);

    print!("{}", crate::report::format_comparison(args.price, &sorted));

    if let Some(path) = &args.export {
        crate::io::write_comparison_csv(path, args.price, &sorted)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_band(config: &AffordConfig, args: BandArgs) -> Result<()> {
    let region = crate::cli::picker::resolve_region(&config.regions, args.region.as_deref())?;
    let band = Calculator::new(config).estimate_income_band(args.min, args.max, &region)?;
    print!("{}", crate::report::format_band(&region, &band));
    Ok(())
}

fn handle_curve(config: &AffordConfig, args: CurveArgs) -> Result<()> {
    let calc = Calculator::new(config);
    let xs = calc.income_grid(args.min, args.max, args.points)?;
    let grid = calc.distribution_curve(&xs)?;

    println!(
        "{}",
        crate::plot::render_distribution_plot(&grid, args.threshold, args.width, args.height)
    );

    if let Some(path) = &args.export_curve {
        let doc = crate::io::curve_file(&config.distribution, grid, args.threshold);
        crate::io::write_curve_json(path, &doc)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<()> {
    let curve = crate::io::read_curve_json(&args.curve)?;
    println!("{}", crate::plot::render_curve_file(&curve, args.width, args.height));
    Ok(())
}

/// Rewrite argv so `afford` defaults to `afford tui`.
///
/// Rules:
/// - `afford`                         -> `afford tui`
/// - `afford --regions x.json ...`    -> `afford tui --regions x.json ...`
/// - `afford --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "afford" | "compare" | "regions" | "band" | "curve" | "plot" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["afford"])), argv(&["afford", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["afford", "--amortization", "30"])),
            argv(&["afford", "tui", "--amortization", "30"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        let compare = argv(&["afford", "compare", "-p", "500000"]);
        assert_eq!(rewrite_args(compare.clone()), compare);
        let help = argv(&["afford", "--help"]);
        assert_eq!(rewrite_args(help.clone()), help);
    }
}
