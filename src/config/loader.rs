//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pay rule
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BatchRules, IntelligentRules, LegacyRules, ReconciliationRules, RuleConfig,
};

/// The rules file expected inside a configuration directory.
pub const RULES_FILE: &str = "rules.yaml";

/// Loads and provides access to pay rule configuration.
///
/// # Directory Structure
///
/// ```text
/// config/crew_pay/
/// └── rules.yaml   # legacy, intelligent, reconciliation and batch sections
/// ```
///
/// # Example
///
/// ```no_run
/// use crew_pay_engine::calculation::LegacyCalculator;
/// use crew_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/crew_pay")?;
/// let calculator = LegacyCalculator::new(*loader.legacy());
/// # Ok::<(), crew_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RuleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `rules.yaml` is missing (`ConfigNotFound`)
    /// - `rules.yaml` contains invalid YAML or mistyped values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rules_path = path.as_ref().join(RULES_FILE);
        let config = Self::load_yaml::<RuleConfig>(&rules_path)?;
        Ok(Self { config })
    }

    /// Builds a loader around an in-memory configuration.
    pub fn from_config(config: RuleConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rule configuration.
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Returns the legacy path rules.
    pub fn legacy(&self) -> &LegacyRules {
        &self.config.legacy
    }

    /// Returns the intelligent path rules.
    pub fn intelligent(&self) -> &IntelligentRules {
        &self.config.intelligent
    }

    /// Returns the reconciliation thresholds.
    pub fn reconciliation(&self) -> &ReconciliationRules {
        &self.config.reconciliation
    }

    /// Returns the batch runner settings.
    pub fn batch(&self) -> &BatchRules {
        &self.config.batch
    }
}
