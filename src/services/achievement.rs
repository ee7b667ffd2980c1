//! Achievement evaluation
//!
//! Rules are evaluated against statistics gathered from storage. Each
//! catalog entry unlocks at most once; re-running an evaluation never
//! duplicates an achievement.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::error::FlowResult;
use crate::models::{Achievement, AchievementDefinition, AchievementStats, CATALOG};
use crate::storage::Storage;

/// Catalog entries satisfied by `stats` that aren't in `already_unlocked`
pub fn evaluate(
    stats: &AchievementStats,
    already_unlocked: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    CATALOG
        .iter()
        .filter(|def| !already_unlocked.contains(def.id))
        .filter(|def| def.rule.is_satisfied(stats))
        .map(|def| def.unlock(now))
        .collect()
}

/// Service for achievement queries and unlocking
pub struct AchievementService<'a> {
    storage: &'a Storage,
}

impl<'a> AchievementService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Statistics as they stand in storage right now
    pub fn stats(&self) -> FlowResult<AchievementStats> {
        Ok(AchievementStats {
            want_wallet_balance: self.storage.wallet.balance()?,
            goals_completed: self.storage.goals.completed_count()?,
            goals_created: self.storage.goals.count()?,
            months_tracked: self.storage.budget.archive_len()?,
        })
    }

    /// Evaluate the current statistics and persist anything newly unlocked
    pub fn check_and_unlock(&self) -> FlowResult<Vec<Achievement>> {
        let stats = self.stats()?;
        self.unlock_for(&stats)
    }

    /// Evaluate the given statistics and persist anything newly unlocked
    pub fn unlock_for(&self, stats: &AchievementStats) -> FlowResult<Vec<Achievement>> {
        let unlocked_ids = self.storage.achievements.unlocked_ids()?;
        let new_achievements = evaluate(stats, &unlocked_ids, Utc::now());

        if new_achievements.is_empty() {
            return Ok(new_achievements);
        }

        self.storage.achievements.insert_new(&new_achievements)?;
        self.storage.achievements.save()?;

        for achievement in &new_achievements {
            info!(id = %achievement.id, name = %achievement.name, "Achievement unlocked");
            self.storage.log_create(
                EntityType::Achievement,
                achievement.id.clone(),
                Some(achievement.name.clone()),
                achievement,
            )?;
        }

        Ok(new_achievements)
    }

    /// Most recently unlocked first
    pub fn recent(&self, count: usize) -> FlowResult<Vec<Achievement>> {
        self.storage.achievements.recent(count)
    }

    /// Every catalog entry paired with its unlock, if any
    pub fn catalog_status(
        &self,
    ) -> FlowResult<Vec<(&'static AchievementDefinition, Option<Achievement>)>> {
        let unlocked = self.storage.achievements.get_all()?;
        Ok(CATALOG
            .iter()
            .map(|def| (def, unlocked.iter().find(|a| a.id == def.id).cloned()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AchievementKind, Money};

    fn ids(achievements: &[Achievement]) -> Vec<&str> {
        achievements.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_nothing_for_fresh_stats() {
        let unlocked = evaluate(&AchievementStats::default(), &HashSet::new(), Utc::now());
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_wallet_thresholds() {
        let stats = AchievementStats {
            want_wallet_balance: Money::from_dollars(500),
            ..Default::default()
        };
        let unlocked = evaluate(&stats, &HashSet::new(), Utc::now());
        assert_eq!(ids(&unlocked), vec!["wallet-100", "wallet-500"]);
        assert!(unlocked.iter().all(|a| a.kind == AchievementKind::Savings));
    }

    #[test]
    fn test_skips_already_unlocked() {
        let stats = AchievementStats {
            months_tracked: 3,
            ..Default::default()
        };
        let already: HashSet<String> = ["first-month".to_string()].into_iter().collect();

        let unlocked = evaluate(&stats, &already, Utc::now());
        assert_eq!(ids(&unlocked), vec!["streak-3"]);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let storage = Storage::in_memory();
        let service = AchievementService::new(&storage);
        let stats = AchievementStats {
            want_wallet_balance: Money::from_dollars(150),
            goals_created: 1,
            goals_completed: 1,
            months_tracked: 1,
        };

        let first = service.unlock_for(&stats).unwrap();
        assert_eq!(first.len(), 4);

        let second = service.unlock_for(&stats).unwrap();
        assert!(second.is_empty());
        assert_eq!(storage.achievements.get_all().unwrap().len(), 4);
    }

    #[test]
    fn test_catalog_status_marks_unlocked() {
        let storage = Storage::in_memory();
        let service = AchievementService::new(&storage);
        service
            .unlock_for(&AchievementStats {
                goals_created: 1,
                ..Default::default()
            })
            .unwrap();

        let status = service.catalog_status().unwrap();
        assert_eq!(status.len(), CATALOG.len());
        let first_goal = status.iter().find(|(def, _)| def.id == "first-goal").unwrap();
        assert!(first_goal.1.is_some());
        assert_eq!(status.iter().filter(|(_, a)| a.is_some()).count(), 1);
    }
}
