//! Log-normal income distribution.
//!
//! Annual income `X` is modeled as `ln X ~ N(μ, σ²)`, parameterized here by the
//! shape `σ` and the scale `e^μ` (the median income):
//!
//! ```text
//! density(x)    = 1 / (x σ √(2π)) · exp(−(ln x − ln scale)² / (2σ²))
//! cumulative(x) = Φ((ln x − ln scale) / σ)
//! ```
//!
//! Parameters are validated once at construction, so evaluation only has to
//! reject bad income values.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::domain::DistributionCurve;
use crate::error::{AppError, Result};
use crate::math::std_normal_cdf;

/// Location of log-income for the Canadian working population.
pub const DEFAULT_MU: f64 = 10.45;

/// Dispersion of log-income.
pub const DEFAULT_SIGMA: f64 = 0.95;

/// Validated log-normal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub struct IncomeDistribution {
    sigma: f64,
    scale: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawParams {
    mu: f64,
    sigma: f64,
}

impl TryFrom<RawParams> for IncomeDistribution {
    type Error = AppError;

    fn try_from(raw: RawParams) -> Result<Self> {
        IncomeDistribution::from_mu(raw.mu, raw.sigma)
    }
}

impl From<IncomeDistribution> for RawParams {
    fn from(d: IncomeDistribution) -> Self {
        RawParams {
            mu: d.mu(),
            sigma: d.sigma,
        }
    }
}

impl Default for IncomeDistribution {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            scale: DEFAULT_MU.exp(),
        }
    }
}

impl IncomeDistribution {
    /// Build from shape `sigma` and `scale = e^μ`.
    pub fn new(sigma: f64, scale: f64) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(AppError::config(format!("income sigma must be finite and > 0 (got {sigma}).")));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(AppError::config(format!("income scale must be finite and > 0 (got {scale}).")));
        }
        Ok(Self { sigma, scale })
    }

    /// Build from the log-space mean `mu` and shape `sigma`.
    pub fn from_mu(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() {
            return Err(AppError::config(format!("income mu must be finite (got {mu}).")));
        }
        Self::new(sigma, mu.exp())
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn mu(&self) -> f64 {
        self.scale.ln()
    }

    /// Probability density at income `x`.
    pub fn density(&self, x: f64) -> Result<f64> {
        check_income(x)?;
        let d = x.ln() - self.scale.ln();
        let norm = 1.0 / (x * self.sigma * (2.0 * PI).sqrt());
        Ok(norm * (-(d * d) / (2.0 * self.sigma * self.sigma)).exp())
    }

    /// Probability that income is at most `x`.
    pub fn cumulative(&self, x: f64) -> Result<f64> {
        check_income(x)?;
        Ok(std_normal_cdf(self.z_score(x)))
    }

    /// Evaluate density and cumulative at every point of `xs`.
    ///
    /// Fails on the first non-positive income; no partial curve is returned.
    pub fn curve(&self, xs: &[f64]) -> Result<DistributionCurve> {
        let mut density = Vec::with_capacity(xs.len());
        let mut cumulative = Vec::with_capacity(xs.len());
        for &x in xs {
            density.push(self.density(x)?);
            cumulative.push(self.cumulative(x)?);
        }
        Ok(DistributionCurve {
            income: xs.to_vec(),
            density,
            cumulative,
        })
    }

    /// Most likely income, `e^(μ − σ²)`.
    pub fn mode(&self) -> f64 {
        self.scale * (-self.sigma * self.sigma).exp()
    }

    /// Mean income, `e^(μ + σ²/2)`.
    pub fn mean(&self) -> f64 {
        self.scale * (0.5 * self.sigma * self.sigma).exp()
    }

    fn z_score(&self, x: f64) -> f64 {
        (x.ln() - self.scale.ln()) / self.sigma
    }
}

fn check_income(x: f64) -> Result<()> {
    if !(x.is_finite() && x > 0.0) {
        return Err(AppError::invalid(format!("income must be finite and > 0 (got {x}).")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{linspace, trapezoid};

    #[test]
    fn median_is_scale() {
        let dist = IncomeDistribution::default();
        let c = dist.cumulative(dist.scale()).unwrap();
        assert!((c - 0.5).abs() < 1e-3);
        assert!((dist.scale() - 34_544.374_709).abs() < 1e-3);
    }

    #[test]
    fn density_matches_closed_form_at_median() {
        let dist = IncomeDistribution::default();
        let expected = 1.0 / (dist.scale() * DEFAULT_SIGMA * (2.0 * PI).sqrt());
        assert!((dist.density(dist.scale()).unwrap() - expected).abs() < 1e-15);
        assert!((expected - 1.215_651_596e-5).abs() < 1e-13);
    }

    #[test]
    fn density_integrates_to_one() {
        let dist = IncomeDistribution::default();
        let xs = linspace(1.0, 2_000_000.0, 20_000).unwrap();
        let ys: Vec<f64> = xs.iter().map(|&x| dist.density(x).unwrap()).collect();
        assert!(ys.iter().all(|&y| y >= 0.0));
        let area = trapezoid(&xs, &ys);
        assert!((area - 1.0).abs() < 0.02, "area = {area}");
    }

    #[test]
    fn cumulative_is_non_decreasing() {
        let dist = IncomeDistribution::default();
        let xs = linspace(1.0, 1_000_000.0, 5_000).unwrap();
        let cs: Vec<f64> = xs.iter().map(|&x| dist.cumulative(x).unwrap()).collect();
        assert!(cs.windows(2).all(|w| w[1] >= w[0]));
        assert!(cs[0] < 1e-6);
        assert!(cs[cs.len() - 1] > 0.999);
    }

    #[test]
    fn non_positive_income_is_invalid() {
        let dist = IncomeDistribution::default();
        assert!(matches!(dist.density(0.0), Err(AppError::InvalidInput(_))));
        assert!(matches!(dist.cumulative(-5.0), Err(AppError::InvalidInput(_))));
        assert!(dist.cumulative(f64::NAN).is_err());
    }

    #[test]
    fn bad_parameters_are_config_errors() {
        assert!(matches!(IncomeDistribution::new(0.0, 1.0), Err(AppError::Configuration(_))));
        assert!(matches!(IncomeDistribution::new(0.9, -1.0), Err(AppError::Configuration(_))));
        assert!(IncomeDistribution::from_mu(f64::INFINITY, 0.9).is_err());
    }

    #[test]
    fn curve_is_parallel_to_input() {
        let dist = IncomeDistribution::default();
        let curve = dist.curve(&[10_000.0, 50_000.0, 90_000.0]).unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.density.len(), 3);
        assert!((curve.cumulative[1] - 0.651_450_8).abs() < 1e-6);
        assert!(dist.curve(&[1.0, 0.0]).is_err());
    }

    #[test]
    fn serde_uses_mu_and_sigma() {
        let json = serde_json::to_string(&IncomeDistribution::default()).unwrap();
        assert!(json.contains("\"mu\""));
        let back: IncomeDistribution = serde_json::from_str(&json).unwrap();
        assert!((back.mu() - DEFAULT_MU).abs() < 1e-12);
        assert!(serde_json::from_str::<IncomeDistribution>(r#"{"mu":10.0,"sigma":-1.0}"#).is_err());
    }

    #[test]
    fn mode_is_below_median_is_below_mean() {
        let dist = IncomeDistribution::default();
        assert!(dist.mode() < dist.scale());
        assert!(dist.scale() < dist.mean());
    }
}
