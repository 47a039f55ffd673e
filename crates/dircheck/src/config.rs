//! Run configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DirCheckError, Result};
use crate::validation::Severity;

/// Configuration for a check run.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "disabled_checks": [], "min_severity": "ERROR" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCheckConfig {
    /// Names of checks to skip.
    pub disabled_checks: Vec<String>,
    /// Warnings below this severity are dropped from the results.
    pub min_severity: Severity,
}

impl Default for DataCheckConfig {
    fn default() -> Self {
        Self {
            disabled_checks: Vec::new(),
            min_severity: Severity::Warning,
        }
    }
}

impl DataCheckConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| DirCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            DirCheckError::Config(format!("invalid config '{}': {}", path.display(), e))
        })
    }

    /// Disable a check by name.
    pub fn with_disabled_check(mut self, name: impl Into<String>) -> Self {
        self.disabled_checks.push(name.into());
        self
    }

    /// Set the minimum reported severity.
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    pub fn is_disabled(&self, check_name: &str) -> bool {
        self.disabled_checks.iter().any(|d| d == check_name)
    }
}
