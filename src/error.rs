//! Custom error types for FinanceFlow
//!
//! This module defines the error hierarchy for the budgeting engine using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for FinanceFlow operations
#[derive(Error, Debug)]
pub enum FlowError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for commands and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Allocation settings are locked against edits
    #[error("Allocations are locked: {0}")]
    Locked(String),

    /// Want Wallet does not hold enough money for the operation
    #[error("Insufficient funds in Want Wallet: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FlowError {
    /// Create a "not found" error for goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Goal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientFunds { .. })
    }

    /// Check if this error came from the allocation lock
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

impl From<std::io::Error> for FlowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for FinanceFlow operations
pub type FlowResult<T> = Result<T, FlowError>;
