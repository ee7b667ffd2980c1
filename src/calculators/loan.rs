//! Loan amortization calculator
//!
//! Standard fixed-payment amortization:
//! `payment = P * r(1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and
//! `n` the term in months. A zero rate degenerates to `P / n`.

use serde::{Deserialize, Serialize};

use super::{check_rate, CalculatorError};
use crate::models::Money;

/// Longest accepted term, 100 years
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Loan inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual interest rate as a percentage (6.0 = 6%)
    pub annual_rate: f64,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100.0 / 12.0
    }

    pub fn validate(&self) -> Result<(), CalculatorError> {
        if self.principal.is_negative() {
            return Err(CalculatorError::NegativeAmount("Principal"));
        }
        check_rate("Annual rate", self.annual_rate)?;
        if self.term_months == 0 {
            return Err(CalculatorError::ZeroTerm);
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(CalculatorError::TermTooLong {
                months: self.term_months,
                max: MAX_TERM_MONTHS,
            });
        }
        Ok(())
    }
}

/// One month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// Fixed monthly payment, rounded to the cent
pub fn monthly_payment(terms: &LoanTerms) -> Result<Money, CalculatorError> {
    terms.validate()?;

    let principal = terms.principal.as_f64();
    let n = terms.term_months as f64;
    let r = terms.monthly_rate();

    let payment = if r == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + r).powf(n);
        principal * (r * growth) / (growth - 1.0)
    };

    if !payment.is_finite() || payment * 100.0 >= i64::MAX as f64 {
        return Err(CalculatorError::PaymentOutOfRange);
    }
    Ok(Money::from_f64(payment))
}

/// Month-by-month schedule. The last row pays off whatever balance rounding
/// left behind, so the schedule always ends at exactly zero.
pub fn schedule(terms: &LoanTerms) -> Result<Vec<AmortizationRow>, CalculatorError> {
    let payment = monthly_payment(terms)?;
    let r = terms.monthly_rate();

    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(terms.term_months as usize);

    for month in 1..=terms.term_months {
        let interest = balance.scale(r);
        let mut principal = payment - interest;

        if month == terms.term_months || principal > balance {
            principal = balance;
        }

        balance -= principal;
        if balance.is_negative() {
            balance = Money::zero();
        }

        rows.push(AmortizationRow {
            month,
            payment: principal + interest,
            principal,
            interest,
            remaining_balance: balance,
        });
    }

    Ok(rows)
}

/// Payment, totals and the full schedule
pub fn summarize(terms: &LoanTerms) -> Result<LoanSummary, CalculatorError> {
    let monthly_payment = monthly_payment(terms)?;
    let schedule = schedule(terms)?;

    let total_paid: Money = schedule.iter().map(|row| row.payment).sum();
    let total_interest: Money = schedule.iter().map(|row| row.interest).sum();

    Ok(LoanSummary {
        monthly_payment,
        total_paid,
        total_interest,
        schedule,
    })
}
