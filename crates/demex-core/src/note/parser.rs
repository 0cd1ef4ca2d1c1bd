//! Two-phase note parser: raw text to a note, note to a device order.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::models::config::ExtractionConfig;
use crate::models::note::PhysicianNote;
use crate::models::order::DeviceOrder;
use crate::note::rules::{
    derive_patient_id, extract_diagnosis, extract_dob, extract_note_date,
    extract_ordering_provider, extract_patient_id, extract_patient_name,
};
use crate::note::specs::extract_specifications;
use crate::note::taxonomy::{detect_device_type, DEVICE_KEYWORDS};
use crate::note::validate::{validate_note, validate_order, FieldTarget, ValidationIssue};

/// A fully extracted note with its structured order.
#[derive(Debug, Clone, Serialize)]
pub struct NoteExtraction {
    pub note: PhysicianNote,
    pub order: DeviceOrder,
}

/// Trait for note parsers. The two phases are strictly sequential: the
/// extract phase is never invoked without a successfully parsed note.
pub trait NoteParser {
    /// Parse phase: raw text into a validated [`PhysicianNote`].
    fn parse_note(&self, raw_text: &str) -> Result<PhysicianNote, ExtractError>;

    /// Extract phase: a parsed note into a validated [`DeviceOrder`].
    fn extract_order(&self, note: &PhysicianNote) -> Result<DeviceOrder, ExtractError>;

    /// Run both phases in order.
    fn process(&self, raw_text: &str) -> Result<NoteExtraction, ExtractError> {
        let note = self.parse_note(raw_text)?;
        let order = self.extract_order(&note)?;
        Ok(NoteExtraction { note, order })
    }
}

/// Deterministic rule-based parser. Stateless per call: identical input
/// always produces identical structured output.
#[derive(Debug, Clone, Default)]
pub struct RuleNoteParser {
    limits: ExtractionConfig,
}

impl RuleNoteParser {
    pub fn new(limits: ExtractionConfig) -> Self {
        Self { limits }
    }
}

impl NoteParser for RuleNoteParser {
    fn parse_note(&self, raw_text: &str) -> Result<PhysicianNote, ExtractError> {
        if raw_text.trim().is_empty() {
            return Err(ExtractError::Validation(vec![ValidationIssue::new(
                FieldTarget::RawText,
                "note text is empty",
            )]));
        }

        debug!(len = raw_text.len(), "parsing note");

        let patient_name = extract_patient_name(raw_text);
        let dob = extract_dob(raw_text);
        let patient_id = extract_patient_id(raw_text)
            .unwrap_or_else(|| derive_patient_id(&patient_name, &dob));

        let note = PhysicianNote {
            patient_name,
            patient_id,
            dob,
            diagnosis: extract_diagnosis(raw_text),
            prescription: extract_prescription(raw_text),
            usage_note: extract_usage_note(raw_text),
            ordering_provider: extract_ordering_provider(raw_text),
            note_date: extract_note_date(raw_text).unwrap_or_else(|| Utc::now().date_naive()),
            raw_text: raw_text.to_string(),
        };

        let issues = validate_note(&note, &self.limits);
        if !issues.is_empty() {
            return Err(ExtractError::Validation(issues));
        }
        Ok(note)
    }

    fn extract_order(&self, note: &PhysicianNote) -> Result<DeviceOrder, ExtractError> {
        let device = detect_device_type(&note.raw_text);
        let specifications = extract_specifications(device, &note.raw_text);

        info!(%device, spec_count = specifications.len(), "assembled device order");

        let order = DeviceOrder {
            device,
            patient_name: note.patient_name.clone(),
            dob: note.dob.clone(),
            diagnosis: note.diagnosis.clone(),
            ordering_provider: note.ordering_provider.clone(),
            patient_id: note.patient_id.clone(),
            specifications,
            ordered_at: Utc::now(),
        };

        let issues = validate_order(&order, &self.limits);
        if !issues.is_empty() {
            return Err(ExtractError::Validation(issues));
        }
        Ok(order)
    }
}

/// First sentence mentioning a device alias, else the whole trimmed note.
pub(crate) fn extract_prescription(text: &str) -> String {
    sentences(text)
        .find(|sentence| {
            let lowered = sentence.to_lowercase();
            DEVICE_KEYWORDS
                .iter()
                .any(|(_, aliases)| aliases.iter().any(|alias| lowered.contains(alias)))
        })
        .map(str::to_string)
        .unwrap_or_else(|| text.trim().to_string())
}

const USAGE_CUES: &[&str] = &["use", "nightly", "during sleep", "as needed", "daily"];

/// First sentence carrying a usage cue, empty when none does.
pub(crate) fn extract_usage_note(text: &str) -> String {
    sentences(text)
        .find(|sentence| {
            let lowered = sentence.to_lowercase();
            USAGE_CUES.iter().any(|cue| lowered.contains(cue))
        })
        .map(str::to_string)
        .unwrap_or_default()
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '\n'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}
