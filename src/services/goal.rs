//! Goal tracker
//!
//! Goals are funded only from the Want Wallet. Deleting a goal does not
//! return what was contributed to it.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{FlowError, FlowResult};
use crate::models::{FinancialGoal, GoalId, Money, NewGoal};
use crate::services::achievement::AchievementService;
use crate::services::wallet::{GoalContribution, WalletService};
use crate::storage::Storage;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal. A goal created with its target already met starts out
    /// completed.
    pub fn add_goal(&self, new_goal: NewGoal) -> FlowResult<FinancialGoal> {
        let goal = FinancialGoal::create(new_goal).map_err(|e| FlowError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;
        info!(goal = %goal.name, target = %goal.target_amount, "Goal created");

        AchievementService::new(self.storage).check_and_unlock()?;
        Ok(goal)
    }

    /// Fund a goal from the Want Wallet
    pub fn contribute(&self, goal_id: GoalId, amount: Money) -> FlowResult<GoalContribution> {
        WalletService::new(self.storage).contribute_to_goal(goal_id, amount)
    }

    /// Remove a goal. Returns false when no goal had that id.
    pub fn delete_goal(&self, goal_id: GoalId) -> FlowResult<bool> {
        let Some(removed) = self.storage.goals.delete(goal_id)? else {
            return Ok(false);
        };
        self.storage.goals.save()?;

        self.storage.log_delete(
            EntityType::Goal,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;
        info!(goal = %removed.name, "Goal deleted");
        Ok(true)
    }

    pub fn get(&self, goal_id: GoalId) -> FlowResult<Option<FinancialGoal>> {
        self.storage.goals.get(goal_id)
    }

    /// Resolve a goal by id, short id or name
    pub fn find(&self, reference: &str) -> FlowResult<FinancialGoal> {
        self.storage
            .goals
            .find(reference)?
            .ok_or_else(|| FlowError::goal_not_found(reference))
    }

    /// High priority first, then oldest first
    pub fn list_goals(&self) -> FlowResult<Vec<FinancialGoal>> {
        let mut goals = self.storage.goals.get_all()?;
        goals.sort_by(|a, b| {
            b.priority
                .rank()
                .cmp(&a.priority.rank())
                .then(a.created_date.cmp(&b.created_date))
        });
        Ok(goals)
    }

    /// Sum of targets and of contributions over every goal
    pub fn totals(&self) -> FlowResult<(Money, Money)> {
        let goals = self.storage.goals.get_all()?;
        let target = goals.iter().map(|g| g.target_amount).sum();
        let saved = goals.iter().map(|g| g.current_amount).sum();
        Ok((target, saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalPriority;
    use crate::services::wallet::WalletService;

    #[test]
    fn test_add_goal_validates() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);

        assert!(service
            .add_goal(NewGoal::new("  ", Money::from_dollars(10)))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_goal(NewGoal::new("Bike", Money::zero()))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_goal(NewGoal::new("Bike", Money::from_dollars(10)).initial_amount(Money::from_cents(-1)))
            .is_err());
        assert_eq!(storage.goals.count().unwrap(), 0);
    }

    #[test]
    fn test_add_goal_already_met() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);

        let goal = service
            .add_goal(
                NewGoal::new("Emergency fund", Money::from_dollars(100))
                    .initial_amount(Money::from_dollars(100)),
            )
            .unwrap();
        assert!(goal.is_completed);
        assert!(goal.completed_date.is_some());

        let unlocked = storage.achievements.unlocked_ids().unwrap();
        assert!(unlocked.contains("first-goal"));
        assert!(unlocked.contains("goal-achieved"));
    }

    #[test]
    fn test_contribute_delegates_to_wallet() {
        let storage = Storage::in_memory();
        WalletService::new(&storage)
            .accumulate(Money::from_dollars(100), "October 2026")
            .unwrap();
        let service = GoalService::new(&storage);
        let goal = service
            .add_goal(NewGoal::new("Headphones", Money::from_dollars(80)))
            .unwrap();

        let result = service.contribute(goal.id, Money::from_dollars(80)).unwrap();
        assert!(result.completed);
        assert_eq!(result.goal.progress_percent(), 100.0);
        assert_eq!(result.goal.remaining_amount(), Money::zero());
        assert_eq!(storage.wallet.balance().unwrap(), Money::from_dollars(20));
    }

    #[test]
    fn test_delete_does_not_refund() {
        let storage = Storage::in_memory();
        WalletService::new(&storage)
            .accumulate(Money::from_dollars(100), "October 2026")
            .unwrap();
        let service = GoalService::new(&storage);
        let goal = service
            .add_goal(NewGoal::new("Shoes", Money::from_dollars(90)))
            .unwrap();
        service.contribute(goal.id, Money::from_dollars(40)).unwrap();

        assert!(service.delete_goal(goal.id).unwrap());
        assert!(!service.delete_goal(goal.id).unwrap());
        assert_eq!(storage.wallet.balance().unwrap(), Money::from_dollars(60));
    }

    #[test]
    fn test_list_goals_by_priority_then_age() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);

        service
            .add_goal(NewGoal::new("Low one", Money::from_dollars(10)).priority(GoalPriority::Low))
            .unwrap();
        service
            .add_goal(NewGoal::new("Medium one", Money::from_dollars(10)))
            .unwrap();
        service
            .add_goal(NewGoal::new("High one", Money::from_dollars(10)).priority(GoalPriority::High))
            .unwrap();

        let names: Vec<_> = service
            .list_goals()
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["High one", "Medium one", "Low one"]);
    }

    #[test]
    fn test_find_by_name() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);
        service
            .add_goal(NewGoal::new("Vacation", Money::from_dollars(900)))
            .unwrap();

        assert_eq!(service.find("vacation").unwrap().name, "Vacation");
        assert!(service.find("Boat").unwrap_err().is_not_found());
    }
}
