//! Biobank and collection records as exported by the directory.
//!
//! Every coded attribute is a reference object (`{"id": ...}`). List
//! attributes that are missing from an export deserialize to empty lists, so
//! callers never need to distinguish "absent" from "empty".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Reference to a coded value or another entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference<T = String> {
    pub id: T,
}

impl<T> Reference<T> {
    pub fn new(id: impl Into<T>) -> Self {
        Self { id: id.into() }
    }
}

/// Set of code identifiers borrowed from a record.
pub type CodeSet<'a> = HashSet<&'a str>;

fn code_set(refs: &[Reference]) -> CodeSet<'_> {
    refs.iter().map(|r| r.id.as_str()).collect()
}

fn references<I, S>(codes: I) -> Vec<Reference>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    codes.into_iter().map(Reference::new).collect()
}

/// A biobank record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biobank {
    /// Globally unique identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// National node the biobank belongs to, when exported explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_node: Option<Reference>,
    /// Capability codes.
    #[serde(default)]
    pub capabilities: Vec<Reference>,
    /// COVID-19 related attribute codes (`covid19`, `BSL2`, ...).
    #[serde(default)]
    pub covid19biobank: Vec<Reference>,
    /// Network memberships.
    #[serde(default)]
    pub network: Vec<Reference>,
}

impl Biobank {
    /// Create a biobank with no attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            national_node: None,
            capabilities: Vec::new(),
            covid19biobank: Vec::new(),
            network: Vec::new(),
        }
    }

    /// Set the capability codes.
    pub fn with_capabilities<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = references(codes);
        self
    }

    /// Set the covid19biobank attribute codes.
    pub fn with_covid_attributes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.covid19biobank = references(codes);
        self
    }

    /// Set the network memberships.
    pub fn with_networks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.network = references(ids);
        self
    }

    /// Set the national node explicitly.
    pub fn with_national_node(mut self, node: impl Into<String>) -> Self {
        self.national_node = Some(Reference::new(node));
        self
    }

    pub fn capability_set(&self) -> CodeSet<'_> {
        code_set(&self.capabilities)
    }

    pub fn covid_attribute_set(&self) -> CodeSet<'_> {
        code_set(&self.covid19biobank)
    }

    pub fn network_set(&self) -> CodeSet<'_> {
        code_set(&self.network)
    }
}

/// A sample collection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Globally unique identifier, e.g. `bbmri-eric:ID:CZ_MMCI:collection:COVID19`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning biobank.
    pub biobank: Reference,
    /// National node the collection belongs to, when exported explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_node: Option<Reference>,
    /// Order of magnitude of the sample count (0 = no samples yet).
    #[serde(default)]
    pub order_of_magnitude: Reference<u32>,
    #[serde(default)]
    pub materials: Vec<Reference>,
    #[serde(default)]
    pub data_categories: Vec<Reference>,
    /// Collection type tags (`DISEASE_SPECIFIC`, `PROSPECTIVE_COLLECTION`, ...).
    #[serde(default, rename = "type")]
    pub types: Vec<Reference>,
    /// Diagnosis codes; a code containing a hyphen denotes a range.
    #[serde(default)]
    pub diagnosis_available: Vec<Reference>,
}

impl Collection {
    /// Create a collection with no attributes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        biobank_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            biobank: Reference::new(biobank_id),
            national_node: None,
            order_of_magnitude: Reference::default(),
            materials: Vec::new(),
            data_categories: Vec::new(),
            types: Vec::new(),
            diagnosis_available: Vec::new(),
        }
    }

    /// Set the order of magnitude.
    pub fn with_order_of_magnitude(mut self, oom: u32) -> Self {
        self.order_of_magnitude = Reference { id: oom };
        self
    }

    /// Set the material codes.
    pub fn with_materials<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials = references(codes);
        self
    }

    /// Set the data category codes.
    pub fn with_data_categories<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_categories = references(codes);
        self
    }

    /// Set the collection type tags.
    pub fn with_types<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = references(codes);
        self
    }

    /// Set the diagnosis codes.
    pub fn with_diagnoses<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagnosis_available = references(codes);
        self
    }

    /// Set the national node explicitly.
    pub fn with_national_node(mut self, node: impl Into<String>) -> Self {
        self.national_node = Some(Reference::new(node));
        self
    }

    pub fn order_of_magnitude(&self) -> u32 {
        self.order_of_magnitude.id
    }

    pub fn material_set(&self) -> CodeSet<'_> {
        code_set(&self.materials)
    }

    pub fn data_category_set(&self) -> CodeSet<'_> {
        code_set(&self.data_categories)
    }

    pub fn type_set(&self) -> CodeSet<'_> {
        code_set(&self.types)
    }

    /// Diagnosis codes in export order.
    pub fn diagnosis_codes(&self) -> impl Iterator<Item = &str> {
        self.diagnosis_available.iter().map(|r| r.id.as_str())
    }
}
