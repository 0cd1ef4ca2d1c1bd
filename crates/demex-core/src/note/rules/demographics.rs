//! Patient demographic field extraction.

use uuid::Uuid;

use super::patterns::{DIAGNOSIS, DOB, PATIENT_ID, PATIENT_NAME};

/// Default for demographic fields with no matching label.
pub const UNKNOWN: &str = "Unknown";

/// Extract the patient name from a "Patient Name:"/"Patient:" line.
pub fn extract_patient_name(text: &str) -> String {
    PATIENT_NAME
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Extract the date of birth from a "DOB:" line, free-form as written.
pub fn extract_dob(text: &str) -> String {
    DOB.captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|dob| !dob.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Extract the diagnosis from a "Diagnosis:" line.
pub fn extract_diagnosis(text: &str) -> String {
    DIAGNOSIS
        .captures(text)
        .map(|caps| caps[1].trim().trim_end_matches('.').trim().to_string())
        .filter(|diagnosis| !diagnosis.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Extract a labeled patient identifier ("Patient ID:"/"MRN:"), if present.
pub fn extract_patient_id(text: &str) -> Option<String> {
    PATIENT_ID.captures(text).map(|caps| caps[1].to_string())
}

/// Identifier for notes that carry none: a UUIDv5 of name and DOB, so the
/// same note always yields the same identifier.
pub fn derive_patient_id(name: &str, dob: &str) -> String {
    let seed = format!("{name}|{dob}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
}
