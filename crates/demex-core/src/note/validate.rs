//! Validation gates over parsed notes and device orders.
//!
//! Validation runs as a gate after each phase, never inline with
//! extraction. Each check contributes zero or more field-targeted issues;
//! any non-empty issue set fails the phase.

use std::fmt;

use serde::Serialize;

use crate::models::config::ExtractionConfig;
use crate::models::note::PhysicianNote;
use crate::models::order::{DeviceOrder, DeviceType};
use crate::note::specs::{KEY_DELIVERY_METHOD, KEY_LITERS, KEY_MASK_TYPE, KEY_PRESSURE};
use crate::note::taxonomy::mentions_dme;

/// The part of the note or order a validation issue points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTarget {
    RawText,
    PatientName,
    PatientId,
    OrderingProvider,
    DeviceType,
    Specifications,
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldTarget::RawText => "raw_text",
            FieldTarget::PatientName => "patient_name",
            FieldTarget::PatientId => "patient_id",
            FieldTarget::OrderingProvider => "ordering_provider",
            FieldTarget::DeviceType => "device",
            FieldTarget::Specifications => "specifications",
        };
        f.write_str(name)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: FieldTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: FieldTarget, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed note. An empty result means the note passes the gate.
pub fn validate_note(note: &PhysicianNote, limits: &ExtractionConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let raw = note.raw_text.trim();
    if raw.is_empty() {
        issues.push(ValidationIssue::new(
            FieldTarget::RawText,
            "note text is empty",
        ));
        return issues;
    }
    if raw.len() < limits.min_note_length {
        issues.push(ValidationIssue::new(
            FieldTarget::RawText,
            format!("note text is shorter than {} bytes", limits.min_note_length),
        ));
    }
    if raw.len() > limits.max_note_length {
        issues.push(ValidationIssue::new(
            FieldTarget::RawText,
            format!("note text exceeds {} bytes", limits.max_note_length),
        ));
    }

    check_bounded(
        &mut issues,
        FieldTarget::PatientName,
        "patient name",
        &note.patient_name,
        limits,
    );
    check_bounded(
        &mut issues,
        FieldTarget::PatientId,
        "patient identifier",
        &note.patient_id,
        limits,
    );
    check_bounded(
        &mut issues,
        FieldTarget::OrderingProvider,
        "ordering provider",
        &note.ordering_provider,
        limits,
    );

    if !mentions_dme(&note.raw_text) {
        issues.push(ValidationIssue::new(
            FieldTarget::RawText,
            "note does not mention any recognized DME device",
        ));
    }

    issues
}

/// Validate a device order. An empty result means the order passes.
pub fn validate_order(order: &DeviceOrder, limits: &ExtractionConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !order.device.is_known() {
        issues.push(ValidationIssue::new(
            FieldTarget::DeviceType,
            "device type could not be determined",
        ));
    }

    check_bounded(
        &mut issues,
        FieldTarget::OrderingProvider,
        "ordering provider",
        &order.ordering_provider,
        limits,
    );
    check_bounded(
        &mut issues,
        FieldTarget::PatientId,
        "patient identifier",
        &order.patient_id,
        limits,
    );

    // Device-specific mandatory specifications
    match order.device {
        DeviceType::Cpap | DeviceType::Bipap => {
            require_spec(&mut issues, order, KEY_MASK_TYPE, "mask type");
            require_spec(&mut issues, order, KEY_PRESSURE, "pressure settings");
        }
        DeviceType::Oxygen => {
            require_spec(&mut issues, order, KEY_LITERS, "flow rate");
            require_spec(&mut issues, order, KEY_DELIVERY_METHOD, "delivery method");
        }
        _ => {}
    }

    issues
}

fn check_bounded(
    issues: &mut Vec<ValidationIssue>,
    field: FieldTarget,
    label: &str,
    value: &str,
    limits: &ExtractionConfig,
) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, format!("{label} is empty")));
    } else if value.len() > limits.max_field_length {
        issues.push(ValidationIssue::new(
            field,
            format!("{label} exceeds {} bytes", limits.max_field_length),
        ));
    }
}

fn require_spec(issues: &mut Vec<ValidationIssue>, order: &DeviceOrder, key: &str, concept: &str) {
    if !order.specifications.contains(key) {
        issues.push(ValidationIssue::new(
            FieldTarget::Specifications,
            format!("{} order is missing {concept}", order.device),
        ));
    }
}
