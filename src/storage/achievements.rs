//! Unlocked achievements repository

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::Achievement;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AchievementData {
    #[serde(default)]
    achievements: Vec<Achievement>,
}

pub struct AchievementRepository {
    backend: Arc<dyn StorageBackend>,
    unlocked: RwLock<Vec<Achievement>>,
}

impl AchievementRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            unlocked: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let file_data: AchievementData = load_or_default(self.backend.as_ref(), keys::ACHIEVEMENTS);

        // A hand-edited file could repeat an id; keep the first unlock
        let mut seen = HashSet::new();
        let deduped: Vec<_> = file_data
            .achievements
            .into_iter()
            .filter(|a| seen.insert(a.id.clone()))
            .collect();

        let mut unlocked = self
            .unlocked
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *unlocked = deduped;
        Ok(())
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::ACHIEVEMENTS, &self.blob()?)
    }

    pub fn blob(&self) -> FlowResult<Value> {
        let file_data = AchievementData {
            achievements: self.get_all()?,
        };
        Ok(serde_json::to_value(file_data)?)
    }

    /// Replace the unlocked list wholesale
    pub fn replace_all(&self, achievements: Vec<Achievement>) -> FlowResult<()> {
        let mut unlocked = self
            .unlocked
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *unlocked = achievements;
        Ok(())
    }

    /// Unlocked achievements in unlock order
    pub fn get_all(&self) -> FlowResult<Vec<Achievement>> {
        let unlocked = self
            .unlocked
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(unlocked.clone())
    }

    pub fn unlocked_ids(&self) -> FlowResult<HashSet<String>> {
        Ok(self.get_all()?.into_iter().map(|a| a.id).collect())
    }

    /// Add achievements whose ids aren't unlocked yet. Returns how many were
    /// actually added.
    pub fn insert_new(&self, achievements: &[Achievement]) -> FlowResult<usize> {
        let mut unlocked = self
            .unlocked
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut added = 0;
        for achievement in achievements {
            if !unlocked.iter().any(|a| a.id == achievement.id) {
                unlocked.push(achievement.clone());
                added += 1;
            }
        }
        Ok(added)
    }

    /// The `count` most recently unlocked
    pub fn recent(&self, count: usize) -> FlowResult<Vec<Achievement>> {
        let mut list = self.get_all()?;
        list.sort_by(|a, b| b.unlocked_date.cmp(&a.unlocked_date));
        list.truncate(count);
        Ok(list)
    }
}
