//! FNPF payroll deduction calculator
//!
//! Employee and employer retirement contributions are percentages of gross
//! salary. The employee share and any voluntary top-up come out of take-home
//! pay; the employer share is paid on top.

use serde::{Deserialize, Serialize};

use super::{check_rate, CalculatorError};
use crate::models::Money;

/// Contribution rates as percentages of gross salary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FnpfRates {
    pub employee_rate: f64,
    pub employer_rate: f64,
}

impl Default for FnpfRates {
    fn default() -> Self {
        Self {
            employee_rate: 8.0,
            employer_rate: 8.0,
        }
    }
}

impl FnpfRates {
    pub fn new(employee_rate: f64, employer_rate: f64) -> Self {
        Self {
            employee_rate,
            employer_rate,
        }
    }

    pub fn validate(&self) -> Result<(), CalculatorError> {
        check_rate("Employee rate", self.employee_rate)?;
        check_rate("Employer rate", self.employer_rate)
    }
}

/// Result of an FNPF calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnpfBreakdown {
    pub gross_salary: Money,
    pub employee_contribution: Money,
    pub employer_contribution: Money,
    pub voluntary_contribution: Money,
    /// Take-home pay: gross minus employee and voluntary contributions
    pub net_salary: Money,
    /// Employee plus employer contributions
    pub total_contribution: Money,
}

/// Compute FNPF deductions for a gross salary
///
/// ```
/// use financeflow::calculators::{fnpf, FnpfRates};
/// use financeflow::models::Money;
///
/// let b = fnpf::calculate(Money::from_dollars(1000), FnpfRates::default(), Money::zero()).unwrap();
/// assert_eq!(b.net_salary, Money::from_dollars(920));
/// assert_eq!(b.total_contribution, Money::from_dollars(160));
/// ```
pub fn calculate(
    gross_salary: Money,
    rates: FnpfRates,
    voluntary_amount: Money,
) -> Result<FnpfBreakdown, CalculatorError> {
    if gross_salary.is_negative() {
        return Err(CalculatorError::NegativeAmount("Gross salary"));
    }
    if voluntary_amount.is_negative() {
        return Err(CalculatorError::NegativeAmount("Voluntary contribution"));
    }
    rates.validate()?;

    let employee_contribution = gross_salary.percent(rates.employee_rate);
    let employer_contribution = gross_salary.percent(rates.employer_rate);

    Ok(FnpfBreakdown {
        gross_salary,
        employee_contribution,
        employer_contribution,
        voluntary_contribution: voluntary_amount,
        net_salary: gross_salary - employee_contribution - voluntary_amount,
        total_contribution: employee_contribution + employer_contribution,
    })
}
