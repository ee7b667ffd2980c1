//! Configuration module for FinanceFlow
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FlowPaths;
pub use settings::Settings;
