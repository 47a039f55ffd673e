//! Directory data model and the registry seam checks consume.

mod model;
mod registry;

pub use model::{Biobank, CodeSet, Collection, Reference};
pub use registry::{DirectorySnapshot, Registry, SnapshotMetadata, national_node};
