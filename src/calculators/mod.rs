//! Stateless financial calculators
//!
//! These do not touch the budget state: the FNPF payroll deduction
//! calculator and the loan amortization calculator.

pub mod fnpf;
pub mod loan;

pub use fnpf::{FnpfBreakdown, FnpfRates};
pub use loan::{AmortizationRow, LoanSummary, LoanTerms};

use thiserror::Error;

/// Invalid calculator input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    #[error("{name} must be between 0% and 100% (got {value}%)")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("Loan term must be at least one month")]
    ZeroTerm,

    #[error("Loan term cannot exceed {max} months (got {months})")]
    TermTooLong { months: u32, max: u32 },

    #[error("Loan payment is too large to represent")]
    PaymentOutOfRange,
}

impl From<CalculatorError> for crate::error::FlowError {
    fn from(err: CalculatorError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), CalculatorError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CalculatorError::RateOutOfRange { name, value })
    }
}
