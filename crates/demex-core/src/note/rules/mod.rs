//! Rule-based field extractors for physician notes.
//!
//! Each extractor is a pure function from raw text to an extracted value
//! with a defined default; nothing here errors.

pub mod dates;
pub mod demographics;
pub mod patterns;
pub mod provider;

pub use dates::{extract_note_date, parse_date_token};
pub use demographics::{
    derive_patient_id, extract_diagnosis, extract_dob, extract_patient_id, extract_patient_name,
};
pub use provider::{extract_ordering_provider, normalize_provider};
