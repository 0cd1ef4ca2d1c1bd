//! Normalized physician note model.

use chrono::NaiveDate;
use serde::Serialize;

/// The normalized representation of one input note.
///
/// Built once per request by the note parser and immutable afterwards. The
/// original input survives verbatim in `raw_text`; every other field is a
/// best-effort extraction with a documented default.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicianNote {
    /// Patient name, "Unknown" when no labeled line matched.
    pub patient_name: String,

    /// Patient identifier: a labeled `Patient ID:`/`MRN:` value, or a
    /// deterministic derived identifier when the note carries none.
    pub patient_id: String,

    /// Date of birth as written in the note, "Unknown" when absent.
    pub dob: String,

    /// Diagnosis, "Unknown" when absent.
    pub diagnosis: String,

    /// The prescription line: the first sentence mentioning a device.
    pub prescription: String,

    /// Usage instructions, empty when the note has none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage_note: String,

    /// Ordering provider, always carrying a single "Dr. " prefix.
    pub ordering_provider: String,

    /// Note date; falls back to the processing date when nothing parses.
    pub note_date: NaiveDate,

    /// The original input, preserved verbatim.
    pub raw_text: String,
}
