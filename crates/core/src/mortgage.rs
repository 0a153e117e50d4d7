//! Fixed-rate mortgage quotes.
//!
//! Everything in this module is a pure function of its inputs. Invalid
//! inputs are rejected with a [`QuoteError`] instead of producing `NaN` or
//! infinite payments.

use std::error::Error;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::money::format_usd;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Inputs of a mortgage quote.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteRequest {
    /// The borrowed amount.
    pub principal_amount: f64,
    /// Annual interest rate as a percentage, `7.0` means 7%.
    pub annual_rate_percent: f64,
    /// Loan term in whole years.
    pub term_years: u32,
}

/// A computed mortgage quote.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoanQuoteResult {
    /// Unrounded monthly payment.
    pub monthly_payment: f64,
    /// The payment formatted as dollars, e.g. `$5,322.42`.
    pub display: String,
}

impl Display for LoanQuoteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Reasons a quote request is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuoteError {
    /// The principal is zero, negative or not a finite number.
    InvalidPrincipal(f64),
    /// The term is zero years.
    InvalidTerm(u32),
    /// The rate is negative or not a finite number.
    InvalidRate(f64),
    /// The inputs are valid but the payment overflows or rounds to zero.
    OutOfRange(f64),
}

impl Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::InvalidPrincipal(value) => write!(
                f,
                "principal amount must be a positive number, got {value}"
            ),
            QuoteError::InvalidTerm(value) => {
                write!(f, "loan term must be at least one year, got {value}")
            }
            QuoteError::InvalidRate(value) => write!(
                f,
                "annual rate must be a non-negative percentage, got {value}"
            ),
            QuoteError::OutOfRange(value) => write!(
                f,
                "monthly payment is not a representable amount, got {value}"
            ),
        }
    }
}

impl Error for QuoteError {}

impl LoanQuoteRequest {
    /// Creates a new request.
    #[inline]
    pub fn new(
        principal_amount: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> Self {
        Self {
            principal_amount,
            annual_rate_percent,
            term_years,
        }
    }

    /// Checks the request without computing anything.
    pub fn validate(&self) -> Result<(), QuoteError> {
        let principal = self.principal_amount;
        if !principal.is_finite() || principal <= 0.0 {
            return Err(QuoteError::InvalidPrincipal(principal));
        }
        if self.term_years == 0 {
            return Err(QuoteError::InvalidTerm(self.term_years));
        }
        let rate = self.annual_rate_percent;
        if !rate.is_finite() || rate < 0.0 {
            return Err(QuoteError::InvalidRate(rate));
        }
        Ok(())
    }

    /// The annual percentage rate converted to a monthly fraction.
    #[inline]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR
    }

    /// Total number of monthly payments over the term.
    #[inline]
    pub fn num_payments(&self) -> u64 {
        u64::from(self.term_years) * 12
    }

    /// Computes the quote.
    pub fn quote(&self) -> Result<LoanQuoteResult, QuoteError> {
        let monthly_payment = monthly_payment(
            self.principal_amount,
            self.annual_rate_percent,
            self.term_years,
        )?;
        Ok(LoanQuoteResult {
            monthly_payment,
            display: format_usd(monthly_payment),
        })
    }
}

/// Computes the fixed monthly payment of a fully amortizing loan.
///
/// A zero rate falls back to splitting the principal evenly across all
/// payments, since the general formula would divide by zero. Payments that
/// overflow to infinity or underflow to zero are rejected.
pub fn monthly_payment(
    principal_amount: f64,
    annual_rate_percent: f64,
    term_years: u32,
) -> Result<f64, QuoteError> {
    let request =
        LoanQuoteRequest::new(principal_amount, annual_rate_percent, term_years);
    request.validate()?;

    let monthly_rate = request.monthly_rate();
    let num_payments = request.num_payments() as f64;
    let payment = if monthly_rate == 0.0 {
        principal_amount / num_payments
    } else {
        // 1 - (1 + r)^-n, evaluated through `ln_1p`/`exp_m1` so that tiny
        // rates and very long terms don't cancel out to zero.
        let discount = -(-num_payments * monthly_rate.ln_1p()).exp_m1();
        principal_amount * monthly_rate / discount
    };
    trace!(
        principal_amount,
        annual_rate_percent, term_years, payment, "computed monthly payment"
    );
    if !payment.is_finite() || payment <= 0.0 {
        return Err(QuoteError::OutOfRange(payment));
    }
    Ok(payment)
}
