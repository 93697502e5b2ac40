//! Configuration loading and management for the crew pay engine.
//!
//! This module provides the rule structures each calculator, the analyzer and
//! the batch runner are built from, and a loader for reading them from YAML.
//!
//! # Example
//!
//! ```no_run
//! use crew_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/crew_pay").unwrap();
//! println!("Guarantee: {} hours", config.legacy().guarantee.minimum_hours);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, RULES_FILE};
pub use types::{
    BatchRules, DEFAULT_THROTTLE_DELAY_MS, GuaranteeRules, IntelligentRules, LegacyRules,
    ReconciliationRules, RuleConfig,
};
