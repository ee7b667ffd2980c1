//! Goal repository for JSON storage

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::{FinancialGoal, GoalId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GoalData {
    #[serde(default)]
    goals: Vec<FinancialGoal>,
}

pub struct GoalRepository {
    backend: Arc<dyn StorageBackend>,
    goals: RwLock<HashMap<GoalId, FinancialGoal>>,
}

impl GoalRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            goals: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let file_data: GoalData = load_or_default(self.backend.as_ref(), keys::GOALS);

        let mut goals = self
            .goals
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.clear();
        for goal in file_data.goals {
            goals.insert(goal.id, goal);
        }

        Ok(())
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::GOALS, &self.blob()?)
    }

    pub fn blob(&self) -> FlowResult<Value> {
        let file_data = GoalData {
            goals: self.get_all()?,
        };
        Ok(serde_json::to_value(file_data)?)
    }

    /// Replace every goal at once
    pub fn replace_all(&self, replacement: Vec<FinancialGoal>) -> FlowResult<()> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *goals = replacement.into_iter().map(|goal| (goal.id, goal)).collect();
        Ok(())
    }

    pub fn get(&self, id: GoalId) -> FlowResult<Option<FinancialGoal>> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.get(&id).cloned())
    }

    /// Resolve a goal by id (full or short form) or by name, case-insensitive
    pub fn find(&self, reference: &str) -> FlowResult<Option<FinancialGoal>> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Some(goal) = goals.values().find(|g| g.id.matches(reference)) {
            return Ok(Some(goal.clone()));
        }

        let wanted = reference.trim().to_lowercase();
        Ok(goals
            .values()
            .find(|g| g.name.to_lowercase() == wanted)
            .cloned())
    }

    /// All goals, in creation order
    pub fn get_all(&self) -> FlowResult<Vec<FinancialGoal>> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = goals.values().cloned().collect();
        list.sort_by(|a, b| a.created_date.cmp(&b.created_date));
        Ok(list)
    }

    /// Insert or replace a goal
    pub fn upsert(&self, goal: FinancialGoal) -> FlowResult<()> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        goals.insert(goal.id, goal);
        Ok(())
    }

    pub fn delete(&self, id: GoalId) -> FlowResult<Option<FinancialGoal>> {
        let mut goals = self
            .goals
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(goals.remove(&id))
    }

    pub fn count(&self) -> FlowResult<usize> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.len())
    }

    pub fn completed_count(&self) -> FlowResult<usize> {
        let goals = self
            .goals
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(goals.values().filter(|g| g.is_completed).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewGoal};
    use crate::storage::backend::MemoryBackend;

    fn goal(name: &str, target: i64) -> FinancialGoal {
        FinancialGoal::create(NewGoal::new(name, Money::from_dollars(target))).unwrap()
    }

    #[test]
    fn test_upsert_and_get() {
        let repo = GoalRepository::new(Arc::new(MemoryBackend::new()));
        let laptop = goal("Laptop", 1200);
        let id = laptop.id;

        repo.upsert(laptop).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name, "Laptop");
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_find_by_short_id_and_name() {
        let repo = GoalRepository::new(Arc::new(MemoryBackend::new()));
        let trip = goal("Trip to Suva", 600);
        let id = trip.id;
        repo.upsert(trip).unwrap();

        assert_eq!(repo.find(&id.short()).unwrap().map(|g| g.id), Some(id));
        assert_eq!(repo.find("trip to suva").unwrap().map(|g| g.id), Some(id));
        assert!(repo.find("Boat").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let repo = GoalRepository::new(Arc::new(MemoryBackend::new()));
        let laptop = goal("Laptop", 1200);
        let id = laptop.id;
        repo.upsert(laptop).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = GoalRepository::new(backend.clone());
        repo.upsert(goal("Laptop", 1200)).unwrap();
        repo.upsert(goal("Phone", 400)).unwrap();
        repo.save().unwrap();

        let reloaded = GoalRepository::new(backend);
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.completed_count().unwrap(), 0);
    }
}
