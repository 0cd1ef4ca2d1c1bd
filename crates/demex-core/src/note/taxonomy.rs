//! Device taxonomy: keyword lists mapping note text to a canonical type.

use crate::models::order::DeviceType;

/// Keyword table in fixed priority order. Overlapping keywords resolve to
/// the first entry whose alias list matches; frequency and position in the
/// note are never consulted.
pub const DEVICE_KEYWORDS: &[(DeviceType, &[&str])] = &[
    (DeviceType::Cpap, &["cpap", "continuous positive airway"]),
    (DeviceType::Bipap, &["bipap", "bi-pap", "bilevel", "bi-level"]),
    (DeviceType::Oxygen, &["oxygen", "o2"]),
    (DeviceType::Nebulizer, &["nebulizer", "nebuliser"]),
    (DeviceType::Wheelchair, &["wheelchair", "wheel chair"]),
    (DeviceType::Walker, &["walker", "rollator"]),
    (DeviceType::HospitalBed, &["hospital bed", "adjustable bed"]),
];

/// Generic terms that mark a note as DME-related even when no concrete
/// device keyword resolves.
pub const GENERIC_DME_TERMS: &[&str] = &[
    "dme",
    "durable medical equipment",
    "respiratory",
    "mobility",
];

/// Detect the device type for a note. Always returns a value; notes with no
/// recognized keyword map to [`DeviceType::Unknown`].
pub fn detect_device_type(text: &str) -> DeviceType {
    let haystack = text.to_lowercase();
    for (device, aliases) in DEVICE_KEYWORDS {
        if aliases.iter().any(|alias| haystack.contains(alias)) {
            return *device;
        }
    }
    DeviceType::Unknown
}

/// True when the note mentions any device alias or generic DME term.
pub fn mentions_dme(text: &str) -> bool {
    let haystack = text.to_lowercase();
    DEVICE_KEYWORDS
        .iter()
        .any(|(_, aliases)| aliases.iter().any(|alias| haystack.contains(alias)))
        || GENERIC_DME_TERMS.iter().any(|term| haystack.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_device() {
        assert_eq!(detect_device_type("needs a CPAP"), DeviceType::Cpap);
        assert_eq!(detect_device_type("start BiPAP therapy"), DeviceType::Bipap);
        assert_eq!(detect_device_type("home oxygen"), DeviceType::Oxygen);
        assert_eq!(
            detect_device_type("albuterol via nebulizer"),
            DeviceType::Nebulizer
        );
        assert_eq!(
            detect_device_type("manual wheelchair"),
            DeviceType::Wheelchair
        );
        assert_eq!(detect_device_type("wheeled walker"), DeviceType::Walker);
        assert_eq!(detect_device_type("needs a rollator"), DeviceType::Walker);
        assert_eq!(
            detect_device_type("electric hospital bed"),
            DeviceType::HospitalBed
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(detect_device_type("NEEDS A CPAP"), DeviceType::Cpap);
    }

    #[test]
    fn overlapping_keywords_resolve_by_priority() {
        // Both mentioned: CPAP sits ahead of Wheelchair in the table.
        let text = "Patient uses a wheelchair and needs a CPAP for sleep";
        assert_eq!(detect_device_type(text), DeviceType::Cpap);
    }

    #[test]
    fn unmatched_text_is_unknown() {
        assert_eq!(
            detect_device_type("routine follow-up, no equipment"),
            DeviceType::Unknown
        );
    }

    #[test]
    fn generic_terms_count_as_dme_mentions() {
        assert!(mentions_dme("needs durable medical equipment at home"));
        assert!(mentions_dme("respiratory support evaluation"));
        assert!(!mentions_dme("routine follow-up visit"));
    }
}
