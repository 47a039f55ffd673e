//! COVID-19 content checks.
//!
//! The check walks the directory twice. The collection pass validates each
//! collection against its owning biobank and records per-biobank facts; the
//! biobank pass validates each biobank's COVID-19 attributes against those
//! facts. Warnings from the collection pass always precede those of the
//! biobank pass.

mod diagnosis;
mod facts;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::directory::{Biobank, Collection, Registry};
use crate::error::Result;
use crate::validation::{Check, EntityType, Severity, Warning};

pub use diagnosis::{
    DiagnosisProfile, ICD10_COVID, ICD10_COVID_CONTROL, ICD11_COVID, SNOMED_COVID, is_range,
};
pub use facts::{BiobankFacts, FactMap, merge_fact};

/// Name reported in every warning of this check.
pub const CHECK_NAME: &str = "COVID";

/// Network every COVID-19 biobank must belong to.
pub const COVID_NETWORK: &str = "bbmri-eric:networkID:EU_BBMRI-ERIC:networks:COVID19";

/// Identifier pattern of prospective COVID-19 collections.
pub const PROSPECTIVE_ID_PATTERN: &str = ".*:COVID19PROSPECTIVE$";

/// Identifier pattern of existing COVID-19 sample collections.
pub const EXISTING_ID_PATTERN: &str = ".*:COVID19$";

/// Materials expected in an existing COVID-19 collection.
pub const COVID_MATERIALS: &[&str] = &[
    "DNA",
    "PATHOGEN",
    "PERIPHERAL_BLOOD_CELLS",
    "PLASMA",
    "RNA",
    "SALIVA",
    "SERUM",
    "WHOLE_BLOOD",
    "FECES",
    "BUFFY_COAT",
    "NASAL_SWAB",
    "THROAT_SWAB",
];

const ATTR_COVID19: &str = "covid19";
const ATTR_PROSPECTIVE: &str = "ProspectiveCollections";
const ATTR_BSL2: &str = "BSL2";
const ATTR_BSL3: &str = "BSL3";

const TYPE_DISEASE_SPECIFIC: &str = "DISEASE_SPECIFIC";
const TYPE_PROSPECTIVE: &str = "PROSPECTIVE_COLLECTION";

const ABILITY_TO_COLLECT: &str = "Ability to collect";

const NO_EVIDENCE_MESSAGE: &str =
    "Biobank has covid19 among covid19biobank but has no relevant services nor any collection of COVID-19 samples nor any collection of COVID-19 controls";

const ZERO_MAGNITUDE_MESSAGE: &str =
    "Prospective collection type represents capability of setting up prospective collections - hence it should have zero order of magnitude";

static PROSPECTIVE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(PROSPECTIVE_ID_PATTERN).unwrap());
static EXISTING_ID: Lazy<Regex> = Lazy::new(|| Regex::new(EXISTING_ID_PATTERN).unwrap());

/// Result of the collection pass.
#[derive(Debug, Clone, Default)]
pub struct CollectionPass {
    pub warnings: Vec<Warning>,
    pub facts: FactMap,
}

/// The COVID-19 consistency check.
#[derive(Debug, Clone, Copy, Default)]
pub struct CovidCheck;

impl CovidCheck {
    /// Run both passes over the registry.
    pub fn evaluate(&self, registry: &dyn Registry) -> Result<Vec<Warning>> {
        tracing::info!("Running COVID content checks ({})", CHECK_NAME);

        let CollectionPass {
            mut warnings,
            facts,
        } = self.collection_pass(registry)?;
        let collection_warnings = warnings.len();

        warnings.extend(self.biobank_pass(registry, &facts));

        tracing::debug!(
            collections = registry.collections().len(),
            biobanks = registry.biobanks().len(),
            collection_warnings,
            biobank_warnings = warnings.len() - collection_warnings,
            "COVID check complete"
        );

        Ok(warnings)
    }

    /// Validate every collection and gather per-biobank facts.
    pub fn collection_pass(&self, registry: &dyn Registry) -> Result<CollectionPass> {
        let mut pass = CollectionPass::default();

        for collection in registry.collections() {
            let biobank_id = registry.collection_biobank_id(&collection.id)?;
            let biobank = registry.biobank_by_id(biobank_id)?;
            let location = registry.collection_label(&collection.id);
            self.check_collection(collection, biobank, &location, &mut pass);
        }

        Ok(pass)
    }

    fn check_collection(
        &self,
        collection: &Collection,
        biobank: &Biobank,
        location: &str,
        pass: &mut CollectionPass,
    ) {
        let covid_attributes = biobank.covid_attribute_set();
        let networks = biobank.network_set();
        let order_of_magnitude = collection.order_of_magnitude();
        let materials = collection.material_set();
        let types = collection.type_set();
        let diagnosis = DiagnosisProfile::classify(collection.diagnosis_codes());

        let facts = pass.facts.entry(biobank.id.clone()).or_default();
        facts.record_diagnosis(&diagnosis);

        let collection_warning = |severity: Severity, message: &str| {
            Warning::new(
                CHECK_NAME,
                location,
                severity,
                &collection.id,
                EntityType::Collection,
                message,
            )
        };
        let biobank_warning = |message: &str| {
            Warning::new(
                CHECK_NAME,
                location,
                Severity::Error,
                &biobank.id,
                EntityType::Biobank,
                message,
            )
        };
        let warnings = &mut pass.warnings;

        if diagnosis.is_covid_relevant() && diagnosis.has_ranges() {
            warnings.push(collection_warning(
                Severity::Error,
                &format!(
                    "It seems that diagnoses contains range - this will render the diagnosis search ineffective for the given collection. Violating diagnosis term(s): {}",
                    diagnosis.ranges.join("; ")
                ),
            ));
        }

        if diagnosis.is_covid_relevant() {
            if !networks.contains(COVID_NETWORK) {
                warnings.push(biobank_warning(&format!(
                    "Biobank contains COVID collection {} but not marked as part of {}",
                    collection.id, COVID_NETWORK
                )));
            }
            if !covid_attributes.contains(ATTR_COVID19) {
                warnings.push(biobank_warning(&format!(
                    "Biobank contains COVID collection {} but does not have \"covid19\" attribute in \"covid19biobank\" section of attributes",
                    collection.id
                )));
            }
        }

        if types.is_empty() {
            warnings.push(collection_warning(Severity::Error, "Collection type not provided"));
        }

        let prospective = PROSPECTIVE_ID.is_match(&collection.id);
        if prospective {
            facts.record_prospective_collection();
            if !types.contains(TYPE_DISEASE_SPECIFIC) {
                warnings.push(collection_warning(
                    Severity::Error,
                    "Prospective COVID-19 collections must have DISEASE_SPECIFIC as one of its types",
                ));
            }
            if !types.contains(TYPE_PROSPECTIVE) {
                warnings.push(collection_warning(
                    Severity::Error,
                    "Prospective COVID-19 collections must have PROSPECTIVE_COLLECTION as one of its types",
                ));
            }
            if !covid_attributes.contains(ATTR_PROSPECTIVE) {
                warnings.push(collection_warning(
                    Severity::Error,
                    "ProspectiveCollections capability must be specified in covid19biobank section of biobank attributes if there is a COVID19PROSPECTIVE collection provided",
                ));
            }
            if order_of_magnitude > 0 {
                warnings.push(collection_warning(Severity::Warning, ZERO_MAGNITUDE_MESSAGE));
            }
            if !diagnosis.is_covid_relevant() {
                warnings.push(collection_warning(
                    Severity::Error,
                    "COVID19PROSPECTIVE collection misses COVID-19 diagnosis or COVID-19 controls filled in",
                ));
            }
        }

        if collection.name.starts_with(ABILITY_TO_COLLECT)
            && diagnosis.is_covid_relevant()
            && !prospective
        {
            warnings.push(collection_warning(
                Severity::Error,
                "Collection having \"ability to collect\" does not have COVID19PROSPECTIVE label",
            ));
            // The prospective branch above already reported this for matching ids.
            if order_of_magnitude > 0 {
                warnings.push(collection_warning(Severity::Warning, ZERO_MAGNITUDE_MESSAGE));
            }
        }

        if EXISTING_ID.is_match(&collection.id) {
            if !types.contains(TYPE_DISEASE_SPECIFIC) {
                warnings.push(collection_warning(
                    Severity::Error,
                    "Existing COVID-19 collections must have DISEASE_SPECIFIC as one of its types",
                ));
            }
            if !COVID_MATERIALS.iter().any(|m| materials.contains(m)) {
                warnings.push(collection_warning(
                    Severity::Warning,
                    "Suspect material types: existing COVID-19 collection does not have any of the common material types: DNA, PATHOGEN, PERIPHERAL_BLOOD_CELLS, PLASMA, RNA, SALIVA, SERUM, WHOLE_BLOOD, FECES, BUFFY_COAT, NASAL_SWAB, THROAT_SWAB",
                ));
            }
            let biosafety =
                covid_attributes.contains(ATTR_BSL2) || covid_attributes.contains(ATTR_BSL3);
            // Swabs are reported regardless of biosafety level; only feces is gated.
            if materials.contains("NASAL_SWAB")
                || materials.contains("THROAT_SWAB")
                || (materials.contains("FECES") && !biosafety)
            {
                warnings.push(collection_warning(
                    Severity::Warning,
                    "Suspect situation: collection contains infectious material (nasal/throat swabs, faeces) while the parent biobank does not indicate BSL2 nor BSL3 available",
                ));
            }
            if !diagnosis.covid_diagnosis {
                warnings.push(collection_warning(
                    Severity::Error,
                    "COVID19 collection misses COVID-19 diagnosis filled in",
                ));
            }
        }
    }

    /// Validate every biobank against the facts from the collection pass.
    pub fn biobank_pass(&self, registry: &dyn Registry, facts: &FactMap) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for biobank in registry.biobanks() {
            let location = registry.biobank_label(&biobank.id);
            let covid_attributes = biobank.covid_attribute_set();
            let in_covid_network = biobank.network_set().contains(COVID_NETWORK);
            let covid_biobank = covid_attributes.contains(ATTR_COVID19);
            let offers_prospective = covid_attributes.contains(ATTR_PROSPECTIVE);
            let biobank_facts = facts.get(&biobank.id).copied().unwrap_or_default();

            let biobank_warning = |severity: Severity, message: String| {
                Warning::new(
                    CHECK_NAME,
                    &location,
                    severity,
                    &biobank.id,
                    EntityType::Biobank,
                    message,
                )
            };

            if in_covid_network && !covid_biobank {
                warnings.push(biobank_warning(
                    Severity::Error,
                    format!(
                        "Biobank is part of {} but does not have covid19 among covid19biobank attributes",
                        COVID_NETWORK
                    ),
                ));
            }
            if covid_biobank && !in_covid_network {
                warnings.push(biobank_warning(
                    Severity::Error,
                    format!(
                        "Biobank has covid19 among covid19biobank attributes but is not part of {}",
                        COVID_NETWORK
                    ),
                ));
            }

            let other_covid_services = covid_attributes.iter().any(|&a| a != ATTR_COVID19);
            if covid_biobank
                && !(biobank_facts.has_covid_collection()
                    || biobank_facts.has_covid_controls()
                    || other_covid_services)
            {
                warnings.push(biobank_warning(
                    Severity::Error,
                    NO_EVIDENCE_MESSAGE.to_string(),
                ));
            }

            if offers_prospective && !biobank_facts.has_prospective_collection() {
                warnings.push(biobank_warning(
                    Severity::Warning,
                    format!(
                        "Biobank has ProspectiveCollections among covid19biobank attributes but has no prospective collection defined (collection ID matching '{}' regex pattern)",
                        PROSPECTIVE_ID_PATTERN
                    ),
                ));
            }
            if biobank_facts.has_prospective_collection() && !offers_prospective {
                warnings.push(biobank_warning(
                    Severity::Error,
                    format!(
                        "Biobank has prospective collection defined (collection ID matching '{}' regex pattern) but ProspectiveCollections is not among covid19biobank attributes",
                        PROSPECTIVE_ID_PATTERN
                    ),
                ));
            }
        }

        warnings
    }
}

impl Check for CovidCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn description(&self) -> &'static str {
        "COVID-19 diagnosis, network and prospective collection consistency"
    }

    fn check(&self, registry: &dyn Registry) -> Result<Vec<Warning>> {
        self.evaluate(registry)
    }
}
