//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Persisted entities that show up in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    AllocationSettings,
    FixedExpense,
    Goal,
    WantWallet,
    Achievement,
    MonthlyArchive,
    BankBalance,
    Income,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityType::Transaction => "Transaction",
            EntityType::AllocationSettings => "AllocationSettings",
            EntityType::FixedExpense => "FixedExpense",
            EntityType::Goal => "Goal",
            EntityType::WantWallet => "WantWallet",
            EntityType::Achievement => "Achievement",
            EntityType::MonthlyArchive => "MonthlyArchive",
            EntityType::BankBalance => "BankBalance",
            EntityType::Income => "Income",
        };
        write!(f, "{}", name)
    }
}

/// A single audit log entry
///
/// `before` is set for updates and deletes, `after` for creates and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// Human-readable label, e.g. a goal or expense name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: None,
        }
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(entity).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// One-line summary, with the diff on a second line when present
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EntityType::AllocationSettings).unwrap(),
            "\"allocation_settings\""
        );
        assert_eq!(EntityType::WantWallet.to_string(), "WantWallet");
    }

    #[test]
    fn test_create_entry() {
        let goal = json!({"name": "Laptop", "target_amount": 120000});
        let entry = AuditEntry::create(
            EntityType::Goal,
            "goal-1a2b3c4d",
            Some("Laptop".to_string()),
            &goal,
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after, Some(goal));
    }

    #[test]
    fn test_update_and_delete_entries() {
        let before = json!({"is_locked": false});
        let after = json!({"is_locked": true});
        let update = AuditEntry::update(
            EntityType::AllocationSettings,
            "allocation",
            None,
            &before,
            &after,
            Some("is_locked: false -> true".to_string()),
        );
        assert!(update.before.is_some() && update.after.is_some());

        let delete = AuditEntry::delete(EntityType::Transaction, "txn-0000", None, &before);
        assert!(delete.before.is_some());
        assert!(delete.after.is_none());
    }

    #[test]
    fn test_round_trip_skips_empty_fields() {
        let entry = AuditEntry::create(EntityType::BankBalance, "bank", None, &json!(88000));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("entity_name"));
        assert!(!line.contains("before"));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.entity_type, EntityType::BankBalance);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::FixedExpense,
            "exp-1234abcd",
            Some("Rent".to_string()),
            &json!({"amount": 50000}),
            &json!({"amount": 55000}),
            Some("amount: 50000 -> 55000".to_string()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE FixedExpense exp-1234abcd (Rent)"));
        assert!(formatted.contains("Changes: amount: 50000 -> 55000"));
    }
}
