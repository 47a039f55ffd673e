//! Per-biobank facts gathered from collections.

use indexmap::IndexMap;

use super::diagnosis::DiagnosisProfile;

/// Merge a newly observed value into a tri-state fact.
///
/// `None` means no collection of the biobank has been seen yet. Once a fact
/// is `Some(true)` it stays true for the rest of the run.
pub fn merge_fact(existing: Option<bool>, observed: bool) -> Option<bool> {
    if existing == Some(true) {
        Some(true)
    } else {
        Some(observed)
    }
}

/// What the collections of one biobank say about its COVID-19 holdings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiobankFacts {
    pub covid_collection: Option<bool>,
    pub covid_controls: Option<bool>,
    pub prospective_collection: Option<bool>,
}

impl BiobankFacts {
    /// Fold one collection's diagnosis profile into the facts.
    pub fn record_diagnosis(&mut self, profile: &DiagnosisProfile) {
        self.covid_collection = merge_fact(self.covid_collection, profile.covid_diagnosis);
        self.covid_controls = merge_fact(self.covid_controls, profile.covid_control);
    }

    /// Note that the biobank owns a prospective COVID-19 collection.
    pub fn record_prospective_collection(&mut self) {
        self.prospective_collection = merge_fact(self.prospective_collection, true);
    }

    pub fn has_covid_collection(&self) -> bool {
        self.covid_collection == Some(true)
    }

    pub fn has_covid_controls(&self) -> bool {
        self.covid_controls == Some(true)
    }

    pub fn has_prospective_collection(&self) -> bool {
        self.prospective_collection == Some(true)
    }
}

/// Facts keyed by biobank identifier, in order of first appearance.
pub type FactMap = IndexMap<String, BiobankFacts>;
