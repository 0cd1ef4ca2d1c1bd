//! Device-specific specification extraction.
//!
//! Each device type has an independent routine behind one dispatch
//! function; adding a device type means adding a routine and a dispatch arm
//! without touching the existing ones.

mod airway;
mod bed;
mod mobility;
mod nebulizer;
mod oxygen;

use crate::models::order::{DeviceType, Specifications};

// Specification keys as they appear on the wire.
pub const KEY_MASK_TYPE: &str = "mask_type";
pub const KEY_PRESSURE: &str = "pressure";
pub const KEY_ADD_ONS: &str = "add_ons";
pub const KEY_QUALIFIER: &str = "qualifier";
pub const KEY_LITERS: &str = "liters";
pub const KEY_DELIVERY_METHOD: &str = "delivery_method";
pub const KEY_USAGE: &str = "usage";
pub const KEY_MEDICATION: &str = "medication";
pub const KEY_FREQUENCY: &str = "frequency";
pub const KEY_TYPE: &str = "type";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_MATTRESS_INCLUDED: &str = "mattress_included";

/// Extract the specification map for a detected device type. Unknown
/// device types yield an empty map, never an error.
pub fn extract_specifications(device: DeviceType, text: &str) -> Specifications {
    match device {
        DeviceType::Cpap | DeviceType::Bipap => airway::extract(text),
        DeviceType::Oxygen => oxygen::extract(text),
        DeviceType::Nebulizer => nebulizer::extract(text),
        DeviceType::Wheelchair => mobility::extract_wheelchair(text),
        DeviceType::Walker => mobility::extract_walker(text),
        DeviceType::HospitalBed => bed::extract(text),
        DeviceType::Unknown => Specifications::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_device_yields_empty_map() {
        let specs = extract_specifications(DeviceType::Unknown, "needs a CPAP at 10 cmH2O");
        assert!(specs.is_empty());
    }
}
