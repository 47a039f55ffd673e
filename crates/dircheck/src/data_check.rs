//! Main DataCheck struct and public API.

use std::path::Path;

use crate::config::DataCheckConfig;
use crate::directory::{DirectorySnapshot, Registry};
use crate::error::Result;
use crate::report::CheckReport;
use crate::validation::CheckEngine;

/// Runs the check family against directory snapshots.
pub struct DataCheck {
    config: DataCheckConfig,
    engine: CheckEngine,
}

impl DataCheck {
    /// Create a DataCheck with every built-in check enabled.
    pub fn new() -> Self {
        Self {
            config: DataCheckConfig::default(),
            engine: CheckEngine::new(),
        }
    }

    /// Create a DataCheck with custom configuration.
    ///
    /// Fails if the configuration disables a check that does not exist.
    pub fn with_config(config: DataCheckConfig) -> Result<Self> {
        let engine = CheckEngine::with_config(&config)?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &DataCheckConfig {
        &self.config
    }

    /// Names of the checks that will run.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.engine.check_names()
    }

    /// Load a JSON directory snapshot and check it.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<CheckReport> {
        let (snapshot, metadata) = DirectorySnapshot::load(path)?;
        let warnings = self.engine.run(&snapshot)?;
        Ok(CheckReport::new(Some(metadata), warnings))
    }

    /// Check a registry the caller already holds.
    pub fn check_registry(&self, registry: &dyn Registry) -> Result<CheckReport> {
        let warnings = self.engine.run(registry)?;
        Ok(CheckReport::new(None, warnings))
    }
}

impl Default for DataCheck {
    fn default() -> Self {
        Self::new()
    }
}
