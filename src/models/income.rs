//! Income source model
//!
//! Income is entered either as a salary subject to FNPF deductions or as
//! another kind of income taken at face value. The net monthly amount feeds
//! the allocation model's monthly income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::calculators::{fnpf, CalculatorError, FnpfBreakdown, FnpfRates};

/// Where the monthly income comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IncomeSource {
    /// Salaried income with FNPF deductions
    Salary {
        gross_monthly: Money,
        rates: FnpfRates,
        #[serde(default)]
        voluntary_amount: Money,
    },
    /// Any other income, used as-is
    Other { amount: Money, description: String },
}

impl IncomeSource {
    /// FNPF breakdown for salaried income
    pub fn fnpf_breakdown(&self) -> Result<Option<FnpfBreakdown>, CalculatorError> {
        match self {
            Self::Salary {
                gross_monthly,
                rates,
                voluntary_amount,
            } => fnpf::calculate(*gross_monthly, *rates, *voluntary_amount).map(Some),
            Self::Other { .. } => Ok(None),
        }
    }

    /// Take-home monthly income
    pub fn net_monthly_income(&self) -> Result<Money, CalculatorError> {
        match self {
            Self::Salary { .. } => Ok(self
                .fnpf_breakdown()?
                .map(|b| b.net_salary)
                .unwrap_or_default()),
            Self::Other { amount, .. } => {
                if amount.is_negative() {
                    Err(CalculatorError::NegativeAmount("Income"))
                } else {
                    Ok(*amount)
                }
            }
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salary {
                gross_monthly,
                rates,
                ..
            } => write!(
                f,
                "Salary {} gross (FNPF {}% employee / {}% employer)",
                gross_monthly, rates.employee_rate, rates.employer_rate
            ),
            Self::Other {
                amount,
                description,
            } => write!(f, "{} ({})", amount, description),
        }
    }
}

/// Persisted income configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeConfig {
    #[serde(default)]
    pub source: Option<IncomeSource>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_net_income() {
        let source = IncomeSource::Salary {
            gross_monthly: Money::from_dollars(1000),
            rates: FnpfRates::default(),
            voluntary_amount: Money::zero(),
        };
        assert_eq!(source.net_monthly_income().unwrap(), Money::from_dollars(920));
        assert!(source.fnpf_breakdown().unwrap().is_some());
    }

    #[test]
    fn test_other_income_taken_as_is() {
        let source = IncomeSource::Other {
            amount: Money::from_dollars(750),
            description: "Market stall".into(),
        };
        assert_eq!(source.net_monthly_income().unwrap(), Money::from_dollars(750));
        assert_eq!(source.fnpf_breakdown().unwrap(), None);
    }

    #[test]
    fn test_tagged_serialization() {
        let source = IncomeSource::Other {
            amount: Money::from_dollars(1),
            description: "Gift".into(),
        };
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("\"kind\":\"other\""));

        let salary: IncomeSource = serde_json::from_str(
            r#"{"kind":"salary","gross_monthly":100000,"rates":{"employee_rate":8.5,"employer_rate":10.0}}"#,
        )
        .unwrap();
        assert_eq!(salary.net_monthly_income().unwrap(), Money::from_dollars(915));
    }
}
