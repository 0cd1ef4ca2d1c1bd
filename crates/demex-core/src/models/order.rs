//! Device order models and the specification value map.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical DME device types.
///
/// `Unknown` is the sentinel for notes whose text matched no device keyword;
/// it never survives order validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "CPAP")]
    Cpap,

    #[serde(rename = "BiPAP")]
    Bipap,

    Oxygen,

    Nebulizer,

    Wheelchair,

    Walker,

    #[serde(rename = "Hospital Bed")]
    HospitalBed,

    Unknown,
}

impl DeviceType {
    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Cpap => "CPAP",
            DeviceType::Bipap => "BiPAP",
            DeviceType::Oxygen => "Oxygen",
            DeviceType::Nebulizer => "Nebulizer",
            DeviceType::Wheelchair => "Wheelchair",
            DeviceType::Walker => "Walker",
            DeviceType::HospitalBed => "Hospital Bed",
            DeviceType::Unknown => "Unknown",
        }
    }

    /// Parse a device name as it appears in completion payloads. Spacing,
    /// case, and separator differences are tolerated.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "cpap" => Some(DeviceType::Cpap),
            "bipap" => Some(DeviceType::Bipap),
            "oxygen" => Some(DeviceType::Oxygen),
            "nebulizer" | "nebuliser" => Some(DeviceType::Nebulizer),
            "wheelchair" => Some(DeviceType::Wheelchair),
            "walker" => Some(DeviceType::Walker),
            "hospitalbed" => Some(DeviceType::HospitalBed),
            _ => None,
        }
    }

    /// True for every variant except the `Unknown` sentinel.
    pub fn is_known(&self) -> bool {
        !matches!(self, DeviceType::Unknown)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single specification value. Values are heterogeneous on the wire:
/// plain strings, string lists (add-ons), or booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

/// Ordered specification map. A `BTreeMap` keeps serialization key order
/// stable so identical input always produces identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specifications(BTreeMap<String, SpecValue>);

impl Specifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), SpecValue::Text(value.into()));
    }

    pub fn insert_list(&mut self, key: &str, values: Vec<String>) {
        self.0.insert(key.to_string(), SpecValue::List(values));
    }

    pub fn insert_flag(&mut self, key: &str, value: bool) {
        self.0.insert(key.to_string(), SpecValue::Flag(value));
    }

    pub fn get(&self, key: &str) -> Option<&SpecValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SpecValue)> {
        self.0.iter()
    }
}

/// A structured device order, the result of the extract phase.
///
/// Serialization flattens the specification map into the top-level object
/// (snake_case keys); absent specifications are omitted, never null. The
/// creation timestamp stays off the wire so serialized output is a pure
/// function of the input text on the rule-based path.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceOrder {
    pub device: DeviceType,
    pub patient_name: String,
    pub dob: String,
    pub diagnosis: String,
    pub ordering_provider: String,
    pub patient_id: String,

    #[serde(flatten)]
    pub specifications: Specifications,

    /// Creation time, immutable for the lifetime of the order.
    #[serde(skip)]
    pub ordered_at: DateTime<Utc>,
}
