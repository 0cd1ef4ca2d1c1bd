//! Parse assisted-extraction completions into a note/order pair.

use chrono::Utc;
use serde_json::Value;

use crate::error::ExtractError;
use crate::models::note::PhysicianNote;
use crate::models::order::{DeviceOrder, DeviceType, Specifications};
use crate::note::parser::{extract_prescription, extract_usage_note, NoteExtraction};
use crate::note::rules::demographics::UNKNOWN;
use crate::note::rules::provider::UNKNOWN_PROVIDER;
use crate::note::rules::{
    derive_patient_id, extract_note_date, extract_patient_id, normalize_provider,
};
use crate::note::specs::{
    KEY_ADD_ONS, KEY_CATEGORY, KEY_DELIVERY_METHOD, KEY_FREQUENCY, KEY_LITERS, KEY_MASK_TYPE,
    KEY_MATTRESS_INCLUDED, KEY_MEDICATION, KEY_PRESSURE, KEY_QUALIFIER, KEY_TYPE, KEY_USAGE,
};

/// Specification keys accepted from the completion contract. Anything else
/// in the payload is ignored.
const SPEC_KEYS: &[&str] = &[
    KEY_MASK_TYPE,
    KEY_PRESSURE,
    KEY_ADD_ONS,
    KEY_QUALIFIER,
    KEY_LITERS,
    KEY_DELIVERY_METHOD,
    KEY_USAGE,
    KEY_MEDICATION,
    KEY_FREQUENCY,
    KEY_TYPE,
    KEY_CATEGORY,
    KEY_MATTRESS_INCLUDED,
];

/// Parse a completion into a note/order pair. The completion may arrive
/// fenced in a markdown code block; anything that does not contain the
/// contract object is an extraction failure (and so a fallback trigger).
pub fn parse_order_completion(
    completion: &str,
    raw_text: &str,
) -> Result<NoteExtraction, ExtractError> {
    let json = strip_fences(completion);
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ExtractError::ExtractionFailed(format!("completion is not valid JSON: {e}")))?;
    let Value::Object(map) = value else {
        return Err(ExtractError::ExtractionFailed(
            "completion is not a JSON object".to_string(),
        ));
    };

    let device = map
        .get("device")
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractError::ExtractionFailed("completion is missing \"device\"".to_string()))?;
    let device = DeviceType::from_name(device).unwrap_or(DeviceType::Unknown);

    let patient_name = string_field(&map, "patient_name").unwrap_or_else(|| UNKNOWN.to_string());
    let dob = string_field(&map, "dob").unwrap_or_else(|| UNKNOWN.to_string());
    let diagnosis = string_field(&map, "diagnosis").unwrap_or_else(|| UNKNOWN.to_string());

    // Same normalization as the rule path, whatever form the model returned
    let ordering_provider = string_field(&map, "ordering_provider")
        .map(|raw| normalize_provider(&raw))
        .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string());

    let mut specifications = Specifications::new();
    for &key in SPEC_KEYS {
        match map.get(key) {
            Some(Value::String(text)) if !text.trim().is_empty() => {
                specifications.insert_text(key, text.trim());
            }
            Some(Value::Array(items)) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect();
                if !values.is_empty() {
                    specifications.insert_list(key, values);
                }
            }
            Some(Value::Bool(flag)) => specifications.insert_flag(key, *flag),
            _ => {}
        }
    }

    let patient_id = string_field(&map, "patient_id")
        .or_else(|| extract_patient_id(raw_text))
        .unwrap_or_else(|| derive_patient_id(&patient_name, &dob));

    // Note-structure fields outside the completion contract come from the
    // same rules the deterministic path uses.
    let note = PhysicianNote {
        patient_name: patient_name.clone(),
        patient_id: patient_id.clone(),
        dob: dob.clone(),
        diagnosis: diagnosis.clone(),
        prescription: extract_prescription(raw_text),
        usage_note: extract_usage_note(raw_text),
        ordering_provider: ordering_provider.clone(),
        note_date: extract_note_date(raw_text).unwrap_or_else(|| Utc::now().date_naive()),
        raw_text: raw_text.to_string(),
    };

    let order = DeviceOrder {
        device,
        patient_name,
        dob,
        diagnosis,
        ordering_provider,
        patient_id,
        specifications,
        ordered_at: Utc::now(),
    };

    Ok(NoteExtraction { note, order })
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Strip a markdown code fence if the completion arrived wrapped in one.
fn strip_fences(completion: &str) -> &str {
    let trimmed = completion.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
