//! Validator configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Expression validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Type calls of unregistered functions as nullable text instead of
    /// rejecting them (default: false)
    pub allow_unknown_functions: bool,

    /// Maximum nesting depth of a validated expression (default: 64)
    pub max_expression_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allow_unknown_functions: false,
            max_expression_depth: 64,
        }
    }
}

impl ValidatorConfig {
    /// Create config for tests: strict function lookup, shallow nesting
    pub fn for_testing() -> Self {
        Self {
            allow_unknown_functions: false,
            max_expression_depth: 16,
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_expression_depth == 0 {
            return Err(Error::Config(
                "max_expression_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
