//! Regex tables for physician note extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Demographic labels
    pub static ref PATIENT_NAME: Regex = Regex::new(
        r"(?i)\bpatient(?:\s+name)?\s*:\s*([^\n]+)"
    ).unwrap();

    pub static ref PATIENT_ID: Regex = Regex::new(
        r"(?i)\b(?:patient\s+id|mrn)\s*:\s*([A-Za-z0-9\-]+)"
    ).unwrap();

    pub static ref DOB: Regex = Regex::new(
        r"(?i)\b(?:dob|date\s+of\s+birth)\s*:\s*([^\n]+)"
    ).unwrap();

    pub static ref DIAGNOSIS: Regex = Regex::new(
        r"(?i)\bdiagnosis\s*:\s*([^\n]+)"
    ).unwrap();

    // Ordering provider, tried in this order; first match wins
    pub static ref PROVIDER_ORDERED_BY: Regex = Regex::new(
        r"(?i:ordered\s+by)\s+(?:[Dd]r\.?\s+)?([A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*){0,2})"
    ).unwrap();

    pub static ref PROVIDER_ORDERING_PHYSICIAN: Regex = Regex::new(
        r"(?i:ordering\s+physician)\s*:\s*(?:[Dd]r\.?\s+)?([A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*){0,2})"
    ).unwrap();

    pub static ref PROVIDER_TITLE: Regex = Regex::new(
        r"\b[Dd]r\.?\s+([A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)?)"
    ).unwrap();

    pub static ref PROVIDER_LABEL: Regex = Regex::new(
        r"(?i:provider)\s*:\s*(?:[Dd]r\.?\s+)?([A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*){0,2})"
    ).unwrap();

    // Note dates
    pub static ref NOTE_DATE_LABELED: Regex = Regex::new(
        r"(?i)\bdate\s*:\s*(\d{1,4}[/\-]\d{1,2}[/\-]\d{1,4})"
    ).unwrap();

    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\b(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}|\d{4}-\d{1,2}-\d{1,2})\b"
    ).unwrap();

    // CPAP/BiPAP settings
    pub static ref PRESSURE_RANGE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:-|to)\s*(\d+(?:\.\d+)?)\s*cm\s*h2o"
    ).unwrap();

    pub static ref PRESSURE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*cm\s*h2o"
    ).unwrap();

    pub static ref AHI_QUALIFIER: Regex = Regex::new(
        r"(?i)\bahi\s*(?:>|greater\s+than)\s*(\d+(?:\.\d+)?)"
    ).unwrap();

    // Oxygen flow notations, tried in this order
    pub static ref FLOW_L_PER_MINUTE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*l(?:iters?)?\s+per\s+min(?:ute)?"
    ).unwrap();

    pub static ref FLOW_LPM: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*lpm\b"
    ).unwrap();

    pub static ref FLOW_SLASH: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d+)?)\s*l\s*/\s*min\b"
    ).unwrap();

    pub static ref FLOW_DELIVERING: Regex = Regex::new(
        r"(?i)delivering\s+(\d+(?:\.\d+)?)\s*l\b"
    ).unwrap();

    // Nebulizer dosing
    pub static ref FREQUENCY_PER_DAY: Regex = Regex::new(
        r"(?i)(\d+)\s*times\s*(?:per\s+|a\s+)?day"
    ).unwrap();
}
