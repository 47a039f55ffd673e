//! Warning records produced by checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level of a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Suspicious data that should be reviewed.
    Warning,
    /// Data that is contractually invalid.
    Error,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of entity a warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Biobank,
    Collection,
}

impl EntityType {
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Biobank => "BIOBANK",
            EntityType::Collection => "COLLECTION",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finding about one directory entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Name of the check that emitted this warning.
    pub check: String,
    /// Sub-check name; empty for checks without sub-checks.
    pub sub_check: String,
    /// Display label (national node) of the entity being examined.
    pub location: String,
    pub severity: Severity,
    /// Identifier of the affected entity.
    pub entity_id: String,
    pub entity_type: EntityType,
    /// Human-readable description.
    pub message: String,
}

impl Warning {
    /// Create a new warning with an empty sub-check.
    pub fn new(
        check: impl Into<String>,
        location: impl Into<String>,
        severity: Severity,
        entity_id: impl Into<String>,
        entity_type: EntityType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            check: check.into(),
            sub_check: String::new(),
            location: location.into(),
            severity,
            entity_id: entity_id.into(),
            entity_type,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {} {}: {}",
            self.location, self.check, self.severity, self.entity_type, self.entity_id, self.message
        )
    }
}
