//! The check interface and the engine that runs the check family.

use crate::checks::CovidCheck;
use crate::config::DataCheckConfig;
use crate::directory::Registry;
use crate::error::{DirCheckError, Result};

use super::warning::{Severity, Warning};

/// A consistency check over a whole directory.
///
/// Checks hold no state between runs; everything a run needs comes from the
/// registry it is handed.
pub trait Check: Send + Sync {
    /// Name reported in every warning this check emits.
    fn name(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Run the check and return warnings in emission order.
    fn check(&self, registry: &dyn Registry) -> Result<Vec<Warning>>;
}

/// Runs every registered check against a registry.
pub struct CheckEngine {
    checks: Vec<Box<dyn Check>>,
    min_severity: Severity,
}

impl CheckEngine {
    /// Create an engine with all built-in checks.
    pub fn new() -> Self {
        Self {
            checks: builtin_checks(),
            min_severity: Severity::Warning,
        }
    }

    /// Create an engine honoring disabled checks and the severity floor.
    pub fn with_config(config: &DataCheckConfig) -> Result<Self> {
        let checks = builtin_checks();

        for name in &config.disabled_checks {
            if !checks.iter().any(|c| c.name() == name) {
                return Err(DirCheckError::Config(format!("unknown check '{}'", name)));
            }
        }

        Ok(Self {
            checks: checks
                .into_iter()
                .filter(|c| !config.is_disabled(c.name()))
                .collect(),
            min_severity: config.min_severity,
        })
    }

    /// Names of the checks this engine will run, in run order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run all checks and collect warnings.
    ///
    /// Warnings keep the order in which checks emitted them.
    pub fn run(&self, registry: &dyn Registry) -> Result<Vec<Warning>> {
        let mut all_warnings = Vec::new();

        for check in &self.checks {
            let warnings = check.check(registry)?;
            tracing::debug!(check = check.name(), warnings = warnings.len(), "check finished");
            all_warnings.extend(warnings);
        }

        all_warnings.retain(|w| w.severity >= self.min_severity);
        Ok(all_warnings)
    }
}

impl Default for CheckEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Every check shipped with the library, in run order.
pub fn builtin_checks() -> Vec<Box<dyn Check>> {
    vec![Box::new(CovidCheck)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Biobank, DirectorySnapshot};

    fn unlisted_covid_biobank() -> DirectorySnapshot {
        // covid19 attribute without network membership and without evidence:
        // one ERROR per rule in the biobank pass.
        DirectorySnapshot::new(
            vec![
                Biobank::new("bbmri-eric:ID:CZ_MMCI", "MMCI")
                    .with_covid_attributes(["covid19"]),
            ],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_engine_registers_covid() {
        assert_eq!(CheckEngine::new().check_names(), vec!["COVID"]);
    }

    #[test]
    fn test_disabled_check_is_skipped() {
        let config = DataCheckConfig::default().with_disabled_check("COVID");
        let engine = CheckEngine::with_config(&config).unwrap();

        assert!(engine.check_names().is_empty());
        assert!(engine.run(&unlisted_covid_biobank()).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_disabled_check_rejected() {
        let config = DataCheckConfig::default().with_disabled_check("NOPE");
        assert!(matches!(
            CheckEngine::with_config(&config),
            Err(DirCheckError::Config(_))
        ));
    }

    #[test]
    fn test_min_severity_filters() {
        let biobank = Biobank::new("b1", "B")
            .with_covid_attributes(["ProspectiveCollections"]);
        let snapshot = DirectorySnapshot::new(vec![biobank], Vec::new()).unwrap();

        let all = CheckEngine::new().run(&snapshot).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].severity, Severity::Warning);

        let config = DataCheckConfig::default().with_min_severity(Severity::Error);
        let errors_only = CheckEngine::with_config(&config)
            .unwrap()
            .run(&snapshot)
            .unwrap();
        assert!(errors_only.is_empty());
    }

    #[test]
    fn test_run_preserves_emission_order() {
        let warnings = CheckEngine::new().run(&unlisted_covid_biobank()).unwrap();

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("is not part of"));
        assert!(warnings[1].message.contains("no relevant services"));
    }
}
