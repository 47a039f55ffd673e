//! Registry of biobanks and collections that checks run against.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{DirCheckError, Result};

use super::model::{Biobank, Collection, Reference};

/// Identifier prefix carrying the national node, e.g. `bbmri-eric:ID:CZ_`.
static NATIONAL_NODE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^bbmri-eric:ID:([A-Z]{2}|EXT)_").unwrap());

/// Read-only view of a loaded directory.
///
/// Lookups fail only when the directory contradicts itself, e.g. a collection
/// pointing at a biobank that does not exist.
pub trait Registry {
    /// All collections in export order.
    fn collections(&self) -> &[Collection];

    /// All biobanks in export order.
    fn biobanks(&self) -> &[Biobank];

    /// Identifier of the biobank owning the given collection.
    fn collection_biobank_id(&self, collection_id: &str) -> Result<&str>;

    /// Look up a biobank by identifier.
    fn biobank_by_id(&self, biobank_id: &str) -> Result<&Biobank>;

    /// Human-readable locator for a collection (its national node).
    fn collection_label(&self, collection_id: &str) -> String;

    /// Human-readable locator for a biobank (its national node).
    fn biobank_label(&self, biobank_id: &str) -> String;
}

/// Resolve the national node for an entity.
///
/// An explicit `national_node` attribute wins; otherwise the node code is
/// taken from the identifier prefix. Identifiers without a recognizable
/// prefix are returned unchanged.
pub fn national_node(id: &str, explicit: Option<&Reference>) -> String {
    if let Some(node) = explicit {
        return node.id.clone();
    }
    NATIONAL_NODE_PREFIX
        .captures(id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Metadata about a loaded snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: std::path::PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    pub biobank_count: usize,
    pub collection_count: usize,
    /// When the snapshot was loaded.
    pub loaded_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    biobanks: Vec<Biobank>,
    #[serde(default)]
    collections: Vec<Collection>,
}

/// In-memory directory backed by a JSON export.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    biobanks: Vec<Biobank>,
    collections: Vec<Collection>,
    biobank_index: HashMap<String, usize>,
    collection_index: HashMap<String, usize>,
}

impl DirectorySnapshot {
    /// Build a snapshot from records already in memory.
    ///
    /// Duplicate identifiers are rejected. Collections referring to unknown
    /// biobanks are accepted here and reported when the owner is looked up.
    pub fn new(biobanks: Vec<Biobank>, collections: Vec<Collection>) -> Result<Self> {
        let biobank_index = index_by_id(biobanks.iter().map(|b| b.id.as_str()), "biobank")?;
        let collection_index =
            index_by_id(collections.iter().map(|c| c.id.as_str()), "collection")?;

        Ok(Self {
            biobanks,
            collections,
            biobank_index,
            collection_index,
        })
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Self::new(file.biobanks, file.collections)
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, SnapshotMetadata)> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| DirCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let file: SnapshotFile = serde_json::from_slice(&bytes)?;
        let snapshot = Self::new(file.biobanks, file.collections)?;

        tracing::debug!(
            path = %path.display(),
            biobanks = snapshot.biobanks.len(),
            collections = snapshot.collections.len(),
            "loaded directory snapshot"
        );

        let metadata = SnapshotMetadata {
            file: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash,
            size_bytes: bytes.len() as u64,
            biobank_count: snapshot.biobanks.len(),
            collection_count: snapshot.collections.len(),
            loaded_at: Utc::now(),
        };

        Ok((snapshot, metadata))
    }

    /// Look up a collection by identifier.
    pub fn collection_by_id(&self, collection_id: &str) -> Result<&Collection> {
        self.collection_index
            .get(collection_id)
            .map(|&i| &self.collections[i])
            .ok_or_else(|| {
                DirCheckError::Registry(format!("unknown collection '{}'", collection_id))
            })
    }
}

fn index_by_id<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if index.insert(id.to_string(), position).is_some() {
            return Err(DirCheckError::Registry(format!(
                "duplicate {} identifier '{}'",
                kind, id
            )));
        }
    }
    Ok(index)
}

impl Registry for DirectorySnapshot {
    fn collections(&self) -> &[Collection] {
        &self.collections
    }

    fn biobanks(&self) -> &[Biobank] {
        &self.biobanks
    }

    fn collection_biobank_id(&self, collection_id: &str) -> Result<&str> {
        self.collection_by_id(collection_id).map(|c| c.biobank.id.as_str())
    }

    fn biobank_by_id(&self, biobank_id: &str) -> Result<&Biobank> {
        self.biobank_index
            .get(biobank_id)
            .map(|&i| &self.biobanks[i])
            .ok_or_else(|| DirCheckError::Registry(format!("unknown biobank '{}'", biobank_id)))
    }

    fn collection_label(&self, collection_id: &str) -> String {
        let explicit = self
            .collection_by_id(collection_id)
            .ok()
            .and_then(|c| c.national_node.as_ref());
        national_node(collection_id, explicit)
    }

    fn biobank_label(&self, biobank_id: &str) -> String {
        let explicit = self
            .biobank_by_id(biobank_id)
            .ok()
            .and_then(|b| b.national_node.as_ref());
        national_node(biobank_id, explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_node_from_identifier() {
        assert_eq!(national_node("bbmri-eric:ID:CZ_MMCI:collection:COVID19", None), "CZ");
        assert_eq!(national_node("bbmri-eric:ID:EXT_NASBIO", None), "EXT");
        assert_eq!(national_node("local-id", None), "local-id");
    }

    #[test]
    fn test_explicit_national_node_wins() {
        let node = Reference::new("DE");
        assert_eq!(national_node("bbmri-eric:ID:CZ_MMCI", Some(&node)), "DE");
    }

    #[test]
    fn test_labels_use_explicit_national_node() {
        let snapshot = DirectorySnapshot::new(
            vec![
                Biobank::new("bbmri-eric:ID:CZ_MMCI", "MMCI")
                    .with_national_node("DE"),
                Biobank::new("bbmri-eric:ID:AT_MUG", "MUG"),
            ],
            vec![
                Collection::new(
                    "bbmri-eric:ID:CZ_MMCI:collection:c1",
                    "Sera",
                    "bbmri-eric:ID:CZ_MMCI",
                )
                .with_national_node("EXT"),
                Collection::new(
                    "bbmri-eric:ID:CZ_MMCI:collection:c2",
                    "Tissue",
                    "bbmri-eric:ID:CZ_MMCI",
                ),
            ],
        )
        .unwrap();

        assert_eq!(snapshot.biobank_label("bbmri-eric:ID:CZ_MMCI"), "DE");
        assert_eq!(snapshot.biobank_label("bbmri-eric:ID:AT_MUG"), "AT");
        assert_eq!(
            snapshot.collection_label("bbmri-eric:ID:CZ_MMCI:collection:c1"),
            "EXT"
        );
        assert_eq!(
            snapshot.collection_label("bbmri-eric:ID:CZ_MMCI:collection:c2"),
            "CZ"
        );
    }

    #[test]
    fn test_duplicate_biobank_rejected() {
        let result = DirectorySnapshot::new(
            vec![Biobank::new("b1", "One"), Biobank::new("b1", "Again")],
            Vec::new(),
        );
        assert!(matches!(result, Err(DirCheckError::Registry(_))));
    }

    #[test]
    fn test_unknown_biobank_is_a_registry_error() {
        let snapshot = DirectorySnapshot::new(
            Vec::new(),
            vec![Collection::new("c1", "Orphan", "missing")],
        )
        .unwrap();

        assert_eq!(snapshot.collection_biobank_id("c1").unwrap(), "missing");
        assert!(matches!(
            snapshot.biobank_by_id("missing"),
            Err(DirCheckError::Registry(_))
        ));
    }

    #[test]
    fn test_from_json_str() {
        let snapshot = DirectorySnapshot::from_json_str(
            r#"{
                "biobanks": [{"id": "bbmri-eric:ID:AT_MUG", "national_node": {"id": "AT"}}],
                "collections": [
                    {"id": "bbmri-eric:ID:AT_MUG:collection:COVID19", "name": "Serum",
                     "biobank": {"id": "bbmri-eric:ID:AT_MUG"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.biobanks().len(), 1);
        assert_eq!(snapshot.collections().len(), 1);
        assert_eq!(snapshot.biobank_label("bbmri-eric:ID:AT_MUG"), "AT");
        assert_eq!(
            snapshot.collection_label("bbmri-eric:ID:AT_MUG:collection:COVID19"),
            "AT"
        );
    }
}
