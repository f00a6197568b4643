//! Calculator configuration.
//!
//! Resolution order: explicit overrides (CLI flags), then environment variables
//! (a `.env` file is honoured), then built-in defaults. Everything is validated
//! here, before the first computation runs.

use std::path::PathBuf;

use log::debug;

use crate::data::RegionTable;
use crate::domain::DEFAULT_AMORTIZATION_YEARS;
use crate::error::{AppError, Result};
use crate::models::{DEFAULT_MU, DEFAULT_SIGMA, IncomeDistribution};

pub const ENV_REGIONS: &str = "AFFORD_REGIONS";
pub const ENV_INCOME_MU: &str = "AFFORD_INCOME_MU";
pub const ENV_INCOME_SIGMA: &str = "AFFORD_INCOME_SIGMA";
pub const ENV_AMORTIZATION: &str = "AFFORD_AMORTIZATION_YEARS";

/// Immutable inputs shared by every computation.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordConfig {
    pub regions: RegionTable,
    pub distribution: IncomeDistribution,
    pub amortization_years: u32,
}

impl Default for AffordConfig {
    fn default() -> Self {
        Self {
            regions: RegionTable::canada(),
            distribution: IncomeDistribution::default(),
            amortization_years: DEFAULT_AMORTIZATION_YEARS,
        }
    }
}

/// Values supplied on the command line; `None` falls through to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub regions_file: Option<PathBuf>,
    pub amortization_years: Option<u32>,
}

impl AffordConfig {
    /// Resolve configuration from overrides and the process environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an explicit variable lookup.
    pub fn resolve<F>(overrides: &ConfigOverrides, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let regions_file = overrides
            .regions_file
            .clone()
            .or_else(|| var(ENV_REGIONS).map(PathBuf::from));
        let regions = match regions_file {
            Some(path) => {
                debug!("loading region rules from {}", path.display());
                RegionTable::from_json_file(&path)?
            }
            None => RegionTable::canada(),
        };

        let mu = parse_var(&var, ENV_INCOME_MU)?.unwrap_or(DEFAULT_MU);
        let sigma = parse_var(&var, ENV_INCOME_SIGMA)?.unwrap_or(DEFAULT_SIGMA);
        let distribution = IncomeDistribution::from_mu(mu, sigma)?;

        let amortization_years = match overrides.amortization_years {
            Some(years) => years,
            None => parse_var(&var, ENV_AMORTIZATION)?.unwrap_or(DEFAULT_AMORTIZATION_YEARS),
        };
        if amortization_years == 0 {
            return Err(AppError::config("amortization period must be at least one year."));
        }

        debug!(
            "config: {} regions, mu={mu}, sigma={sigma}, amortization={amortization_years}y",
            regions.len()
        );

        Ok(Self {
            regions,
            distribution,
            amortization_years,
        })
    }
}

fn parse_var<F, T>(var: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| AppError::config(format!("{key}='{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AffordConfig::resolve(&ConfigOverrides::default(), env(&[])).unwrap();
        assert_eq!(config, AffordConfig::default());
        assert_eq!(config.amortization_years, 25);
    }

    #[test]
    fn environment_overrides_distribution() {
        let config = AffordConfig::resolve(
            &ConfigOverrides::default(),
            env(&[(ENV_INCOME_MU, "11.0"), (ENV_INCOME_SIGMA, " 0.8 ")]),
        )
        .unwrap();
        assert!((config.distribution.mu() - 11.0).abs() < 1e-12);
        assert_eq!(config.distribution.sigma(), 0.8);
    }

    #[test]
    fn flag_beats_environment() {
        let overrides = ConfigOverrides {
            amortization_years: Some(30),
            ..Default::default()
        };
        let config = AffordConfig::resolve(&overrides, env(&[(ENV_AMORTIZATION, "20")])).unwrap();
        assert_eq!(config.amortization_years, 30);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let cases = [
            (ENV_INCOME_SIGMA, "0"),
            (ENV_INCOME_SIGMA, "wide"),
            (ENV_INCOME_MU, "NaN"),
            (ENV_AMORTIZATION, "0"),
            (ENV_AMORTIZATION, "-5"),
        ];
        for (key, value) in cases {
            let result = AffordConfig::resolve(&ConfigOverrides::default(), env(&[(key, value)]));
            assert!(
                matches!(result, Err(AppError::Configuration(_))),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn missing_regions_file_is_config_error() {
        let result = AffordConfig::resolve(
            &ConfigOverrides::default(),
            env(&[(ENV_REGIONS, "/nonexistent/regions.json")]),
        );
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
