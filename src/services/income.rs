//! Income service
//!
//! Records how the monthly income was entered and feeds the resulting net
//! amount into the allocation settings.

use chrono::Utc;
use tracing::info;

use crate::audit::EntityType;
use crate::calculators::FnpfBreakdown;
use crate::error::{FlowError, FlowResult};
use crate::models::{IncomeConfig, IncomeSource, Money};
use crate::services::budget::{AllocationUpdate, BudgetService};
use crate::storage::Storage;

const INCOME_ENTITY_ID: &str = "income";

pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the income source and use its net amount as the monthly income
    ///
    /// Fails while allocations are locked, like any other income edit.
    pub fn set_income(&self, source: IncomeSource) -> FlowResult<Money> {
        if let IncomeSource::Other { description, .. } = &source {
            if description.trim().is_empty() {
                return Err(FlowError::Validation(
                    "Income description cannot be empty".into(),
                ));
            }
        }
        let net = source.net_monthly_income()?;

        BudgetService::new(self.storage).update_allocation_settings(AllocationUpdate {
            monthly_income: Some(net),
            ..Default::default()
        })?;

        let before = self.storage.income.get()?;
        let after = IncomeConfig {
            source: Some(source),
            updated_at: Some(Utc::now()),
        };
        self.storage.income.set(after.clone())?;
        self.storage.income.save()?;

        match before.source {
            Some(_) => self.storage.log_update(
                EntityType::Income,
                INCOME_ENTITY_ID,
                None,
                &before,
                &after,
                None,
            )?,
            None => {
                self.storage
                    .log_create(EntityType::Income, INCOME_ENTITY_ID, None, &after)?
            }
        }
        info!(net = %net, "Monthly income set");

        Ok(net)
    }

    pub fn current(&self) -> FlowResult<IncomeConfig> {
        self.storage.income.get()
    }

    /// FNPF breakdown of the stored salary, if income was entered as one
    pub fn breakdown(&self) -> FlowResult<Option<FnpfBreakdown>> {
        match self.storage.income.get()?.source {
            Some(source) => Ok(source.fnpf_breakdown()?),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::FnpfRates;

    fn salary(gross: i64) -> IncomeSource {
        IncomeSource::Salary {
            gross_monthly: Money::from_dollars(gross),
            rates: FnpfRates::default(),
            voluntary_amount: Money::zero(),
        }
    }

    #[test]
    fn test_salary_sets_net_income() {
        let storage = Storage::in_memory();
        let service = IncomeService::new(&storage);

        let net = service.set_income(salary(1000)).unwrap();
        assert_eq!(net, Money::from_dollars(920));
        assert_eq!(
            storage.budget.settings().unwrap().monthly_income,
            Money::from_dollars(920)
        );

        let breakdown = service.breakdown().unwrap().unwrap();
        assert_eq!(breakdown.employer_contribution, Money::from_dollars(80));
        assert!(service.current().unwrap().updated_at.is_some());
    }

    #[test]
    fn test_other_income_has_no_breakdown() {
        let storage = Storage::in_memory();
        let service = IncomeService::new(&storage);

        service
            .set_income(IncomeSource::Other {
                amount: Money::from_dollars(640),
                description: "Freelance".into(),
            })
            .unwrap();
        assert!(service.breakdown().unwrap().is_none());
        assert_eq!(
            storage.budget.settings().unwrap().monthly_income,
            Money::from_dollars(640)
        );
    }

    #[test]
    fn test_rejected_while_locked() {
        let storage = Storage::in_memory();
        BudgetService::new(&storage).lock_allocations().unwrap();
        let service = IncomeService::new(&storage);

        assert!(service.set_income(salary(1000)).unwrap_err().is_locked());
        assert!(service.current().unwrap().source.is_none());
    }

    #[test]
    fn test_invalid_income_rejected() {
        let storage = Storage::in_memory();
        let service = IncomeService::new(&storage);

        assert!(service.set_income(salary(-5)).is_err());
        assert!(service
            .set_income(IncomeSource::Other {
                amount: Money::from_dollars(10),
                description: " ".into(),
            })
            .is_err());
        assert!(service.current().unwrap().source.is_none());
    }
}
