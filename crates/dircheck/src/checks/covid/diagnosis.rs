//! Classification of a collection's diagnosis codes.
//!
//! Codes are matched by unanchored substring search so that prefixed forms
//! such as `urn:miriam:icd:U07.1` match the same way bare `U07.1` does.

/// ICD-10 COVID-19 code family.
pub const ICD10_COVID: &str = "U07";
/// ICD-10 "observation for suspected exposure, ruled out".
pub const ICD10_COVID_CONTROL: &str = "Z03.818";
/// ICD-11 COVID-19 code family.
pub const ICD11_COVID: &str = "RA01";
/// SNOMED CT concepts for COVID-19 disease and infection.
pub const SNOMED_COVID: &[&str] = &[
    "840533007",
    "840534001",
    "840535000",
    "840536004",
    "840539006",
    "840544004",
    "840546002",
];

/// A diagnosis entry is a range when it contains a hyphen, e.g. `C00-C97`.
pub fn is_range(code: &str) -> bool {
    code.contains('-')
}

/// COVID-19 relevant facts derived from one collection's diagnosis codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisProfile {
    /// At least one code denotes COVID-19.
    pub covid_diagnosis: bool,
    /// At least one code denotes a COVID-19 negative control.
    pub covid_control: bool,
    /// Range entries, in the order they were listed.
    pub ranges: Vec<String>,
}

impl DiagnosisProfile {
    /// Classify a list of diagnosis codes.
    ///
    /// Ranges are collected but never matched. Every single code is tested
    /// against every pattern, so one code may set both flags.
    pub fn classify<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut profile = Self::default();

        for code in codes {
            if is_range(code) {
                profile.ranges.push(code.to_string());
                continue;
            }
            if code.contains(ICD10_COVID) {
                profile.covid_diagnosis = true;
            }
            if code.contains(ICD10_COVID_CONTROL) {
                profile.covid_control = true;
            }
            if code.contains(ICD11_COVID) {
                profile.covid_diagnosis = true;
            }
            if SNOMED_COVID.iter().any(|snomed| code.contains(snomed)) {
                profile.covid_diagnosis = true;
            }
        }

        profile
    }

    /// True when the collection holds COVID-19 cases or controls.
    pub fn is_covid_relevant(&self) -> bool {
        self.covid_diagnosis || self.covid_control
    }

    pub fn has_ranges(&self) -> bool {
        !self.ranges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icd10_diagnosis_with_range() {
        let profile = DiagnosisProfile::classify(["U07.1", "Z03.81-88"]);

        assert!(profile.covid_diagnosis);
        assert!(!profile.covid_control);
        assert_eq!(profile.ranges, vec!["Z03.81-88".to_string()]);
    }

    #[test]
    fn test_control_code() {
        let profile = DiagnosisProfile::classify(["urn:miriam:icd:Z03.818"]);

        assert!(!profile.covid_diagnosis);
        assert!(profile.covid_control);
        assert!(profile.is_covid_relevant());
    }

    #[test]
    fn test_icd11_and_snomed() {
        assert!(DiagnosisProfile::classify(["RA01.0"]).covid_diagnosis);
        assert!(DiagnosisProfile::classify(["http://snomed.info/id/840539006"]).covid_diagnosis);
        assert!(!DiagnosisProfile::classify(["840539005"]).covid_diagnosis);
    }

    #[test]
    fn test_ranges_are_not_matched() {
        let profile = DiagnosisProfile::classify(["U07-U08"]);

        assert!(!profile.is_covid_relevant());
        assert!(profile.has_ranges());
    }

    #[test]
    fn test_substring_match_is_unanchored() {
        assert!(DiagnosisProfile::classify(["XU079"]).covid_diagnosis);
    }

    #[test]
    fn test_unrelated_codes() {
        let profile = DiagnosisProfile::classify(["C50", "urn:miriam:icd:E11.9"]);
        assert_eq!(profile, DiagnosisProfile::default());
    }
}
