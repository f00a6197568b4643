//! Fixed-rate amortizing mortgage and the income needed to carry it.
//!
//! ```text
//! payment = loan · r(1+r)^n / ((1+r)^n − 1)      r = annual_rate / 12, n = years × 12
//! income  = payment × 12 / HOUSING_RATIO
//! ```
//!
//! With `r = 0` the annuity factor is 0/0, so the loan is repaid straight-line
//! (`loan / n`). A down payment covering the whole price needs no income at all.

use crate::domain::{AffordabilityResult, HOUSING_RATIO};
use crate::error::{AppError, Result};

/// Monthly payment on `loan` at `annual_rate` over `years`.
pub fn monthly_payment(loan: f64, annual_rate: f64, years: u32) -> Result<f64> {
    check_rate(annual_rate)?;
    let n = payment_count(years)?;
    if loan <= 0.0 {
        return Ok(0.0);
    }

    let r = annual_rate / 12.0;
    if r == 0.0 {
        return Ok(loan / n as f64);
    }
    // r(1+r)^n / ((1+r)^n − 1) = r / (1 − (1+r)^−n). expm1 keeps tiny rates
    // from cancelling and the negative exponent cannot overflow for long terms.
    let log_growth = n as f64 * r.ln_1p();
    Ok(loan * r / -(-log_growth).exp_m1())
}

/// Minimum gross annual income to qualify for `price` with the given terms.
pub fn minimum_income(price: f64, down_payment_fraction: f64, annual_rate: f64, years: u32) -> Result<f64> {
    Ok(qualify(price, down_payment_fraction, annual_rate, years)?.minimum_income)
}

/// Full breakdown of a qualification: down payment, loan, payment and income.
pub fn qualify(price: f64, down_payment_fraction: f64, annual_rate: f64, years: u32) -> Result<AffordabilityResult> {
    if !(price.is_finite() && price > 0.0) {
        return Err(AppError::invalid(format!("purchase price must be finite and > 0 (got {price}).")));
    }
    if !(down_payment_fraction.is_finite() && down_payment_fraction >= 0.0) {
        return Err(AppError::invalid(format!(
            "down payment fraction must be finite and >= 0 (got {down_payment_fraction})."
        )));
    }

    let down_payment = (price * down_payment_fraction).min(price);
    let loan = price - down_payment;
    let payment = monthly_payment(loan, annual_rate, years)?;

    Ok(AffordabilityResult {
        minimum_income: payment * 12.0 / HOUSING_RATIO,
        down_payment,
        down_payment_fraction,
        loan,
        monthly_payment: payment,
        annual_rate,
        amortization_years: years,
    })
}

fn payment_count(years: u32) -> Result<u64> {
    if years == 0 {
        return Err(AppError::invalid("amortization period must be at least one year."));
    }
    Ok(u64::from(years) * 12)
}

fn check_rate(annual_rate: f64) -> Result<()> {
    if !(annual_rate.is_finite() && annual_rate >= 0.0) {
        return Err(AppError::invalid(format!(
            "interest rate must be finite and >= 0 (got {annual_rate})."
        )));
    }
    Ok(())
}
