//! Strongly-typed ID wrappers for every persisted entity
//!
//! Newtype wrappers keep a goal id from being passed where a transaction id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short prefixed form used in listings, e.g. `goal-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Parse an ID from a full UUID, optionally prefixed
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// Check whether a user-supplied reference (full UUID or short
            /// prefixed form) points at this ID
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim();
                if let Ok(id) = reference.parse::<Self>() {
                    return id == *self;
                }
                let stripped = reference.strip_prefix($display_prefix).unwrap_or(reference);
                !stripped.is_empty() && self.0.simple().to_string().starts_with(stripped)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(FixedExpenseId, "exp-");
define_id!(GoalId, "goal-");
define_id!(WalletEntryId, "wal-");
define_id!(ArchiveId, "arc-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        let id = GoalId::new();
        let short = id.short();
        assert!(short.starts_with("goal-"));
        assert_eq!(short.len(), 13);
    }

    #[test]
    fn test_matches_full_and_short() {
        let id = TransactionId::new();
        assert!(id.matches(&id.to_string()));
        assert!(id.matches(&id.short()));
        assert!(!id.matches("txn-"));
        assert!(!id.matches(&TransactionId::new().to_string()));
    }

    #[test]
    fn test_parse_with_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = GoalId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed = GoalId::parse(&format!("goal-{}", uuid_str)).unwrap();
        assert_eq!(id, prefixed);
    }

    #[test]
    fn test_id_serialization() {
        let id = FixedExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: FixedExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
