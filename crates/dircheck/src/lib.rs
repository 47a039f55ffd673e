//! dircheck: consistency checks for biobank directory snapshots.
//!
//! A directory export lists biobanks and the sample collections they hold.
//! Checks walk a loaded snapshot and report warnings for data curators; the
//! library never modifies the records it inspects.
//!
//! The built-in `COVID` check relates COVID-19 diagnosis codes, collection
//! identifiers, material types, network membership and the biobank's
//! `covid19biobank` attributes.
//!
//! # Example
//!
//! ```no_run
//! use dircheck::DataCheck;
//!
//! let report = DataCheck::new().check_file("directory.json").unwrap();
//!
//! println!("Warnings: {}", report.summary.total);
//! for warning in &report.warnings {
//!     println!("{}", warning);
//! }
//! ```

pub mod checks;
pub mod config;
pub mod directory;
pub mod error;
pub mod report;
pub mod validation;

mod data_check;

pub use crate::data_check::DataCheck;
pub use checks::CovidCheck;
pub use config::DataCheckConfig;
pub use directory::{Biobank, Collection, DirectorySnapshot, Registry, SnapshotMetadata};
pub use error::{DirCheckError, Result};
pub use report::{CheckReport, CheckSummary, ExportFormat, WarningCounts};
pub use validation::{Check, CheckEngine, EntityType, Severity, Warning};
