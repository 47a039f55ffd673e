//! Check reports: summary statistics, JSON persistence and tabular export.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::directory::SnapshotMetadata;
use crate::error::{DirCheckError, Result};
use crate::validation::{EntityType, Severity, Warning};

/// Counts of warnings by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningCounts {
    pub error: usize,
    pub warning: usize,
}

/// Summary of a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Total number of warnings.
    pub total: usize,
    /// Warnings by severity.
    pub by_severity: WarningCounts,
    /// Warnings by check name, in first-emitted order.
    pub by_check: IndexMap<String, usize>,
    /// Warnings by entity type.
    pub by_entity_type: IndexMap<String, usize>,
    /// Distinct biobanks with at least one warning.
    pub biobanks_affected: usize,
    /// Distinct collections with at least one warning.
    pub collections_affected: usize,
    pub generated_at: DateTime<Utc>,
}

impl CheckSummary {
    /// Compute the summary of a warning list.
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        let mut by_severity = WarningCounts::default();
        let mut by_check: IndexMap<String, usize> = IndexMap::new();
        let mut by_entity_type: IndexMap<String, usize> = IndexMap::new();
        let mut biobanks: HashSet<&str> = HashSet::new();
        let mut collections: HashSet<&str> = HashSet::new();

        for warning in warnings {
            match warning.severity {
                Severity::Error => by_severity.error += 1,
                Severity::Warning => by_severity.warning += 1,
            }
            *by_check.entry(warning.check.clone()).or_insert(0) += 1;
            *by_entity_type
                .entry(warning.entity_type.label().to_string())
                .or_insert(0) += 1;
            match warning.entity_type {
                EntityType::Biobank => biobanks.insert(&warning.entity_id),
                EntityType::Collection => collections.insert(&warning.entity_id),
            };
        }

        Self {
            total: warnings.len(),
            by_severity,
            by_check,
            by_entity_type,
            biobanks_affected: biobanks.len(),
            collections_affected: collections.len(),
            generated_at: Utc::now(),
        }
    }
}

/// Tabular export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

/// Result of running checks against a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Snapshot the checks ran against, when loaded from a file.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<SnapshotMetadata>,
    /// Warnings in emission order.
    pub warnings: Vec<Warning>,
    pub summary: CheckSummary,
}

impl CheckReport {
    pub fn new(source: Option<SnapshotMetadata>, warnings: Vec<Warning>) -> Self {
        let summary = CheckSummary::from_warnings(&warnings);
        Self {
            source,
            warnings,
            summary,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.summary.by_severity.error > 0
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(create_file(path)?);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            DirCheckError::Persistence(format!("Failed to serialize report: {}", e))
        })?;
        Ok(())
    }

    /// Load a report previously written by [`CheckReport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            DirCheckError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            DirCheckError::Persistence(format!(
                "Failed to parse report '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write one row per warning as CSV or TSV.
    pub fn export(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(format.delimiter())
            .from_writer(BufWriter::new(create_file(path)?));

        if self.warnings.is_empty() {
            writer.write_record([
                "check",
                "sub_check",
                "location",
                "severity",
                "entity_id",
                "entity_type",
                "message",
            ])?;
        }
        for warning in &self.warnings {
            writer.serialize(warning)?;
        }

        writer.flush().map_err(|e| DirCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                DirCheckError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    File::create(path).map_err(|e| {
        DirCheckError::Persistence(format!(
            "Failed to create file '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_warnings() -> Vec<Warning> {
        vec![
            Warning::new(
                "COVID",
                "CZ",
                Severity::Error,
                "c1",
                EntityType::Collection,
                "Collection type not provided",
            ),
            Warning::new(
                "COVID",
                "CZ",
                Severity::Warning,
                "c1",
                EntityType::Collection,
                "Suspect material types",
            ),
            Warning::new(
                "COVID",
                "CZ",
                Severity::Error,
                "b1",
                EntityType::Biobank,
                "Biobank, with comma",
            ),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let report = CheckReport::new(None, sample_warnings());

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_severity, WarningCounts { error: 2, warning: 1 });
        assert_eq!(report.summary.by_check["COVID"], 3);
        assert_eq!(report.summary.by_entity_type["COLLECTION"], 2);
        assert_eq!(report.summary.collections_affected, 1);
        assert_eq!(report.summary.biobanks_affected, 1);
        assert!(report.has_errors());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("covid.json");
        let report = CheckReport::new(None, sample_warnings());

        report.save(&path).unwrap();
        let loaded = CheckReport::load(&path).unwrap();

        assert_eq!(loaded.warnings, report.warnings);
        assert!(loaded.source.is_none());
    }

    #[test]
    fn test_export_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.csv");
        CheckReport::new(None, sample_warnings())
            .export(&path, ExportFormat::Csv)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "check,sub_check,location,severity,entity_id,entity_type,message");
        assert_eq!(lines[1], "COVID,,CZ,ERROR,c1,COLLECTION,Collection type not provided");
        assert!(lines[3].ends_with("\"Biobank, with comma\""));
    }

    #[test]
    fn test_export_tsv_without_warnings_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("warnings.tsv");
        CheckReport::new(None, Vec::new())
            .export(&path, ExportFormat::Tsv)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "check\tsub_check\tlocation\tseverity\tentity_id\tentity_type\tmessage"
        );
    }
}
