//! CPAP/BiPAP specification extraction.

use crate::models::order::Specifications;
use crate::note::rules::patterns::{AHI_QUALIFIER, PRESSURE, PRESSURE_RANGE};

use super::{KEY_ADD_ONS, KEY_MASK_TYPE, KEY_PRESSURE, KEY_QUALIFIER};

/// Recognized add-ons, presence-based and not mutually exclusive.
const ADD_ONS: &[&str] = &["humidifier", "heated tube"];

pub fn extract(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    // First literal match wins
    if haystack.contains("full face") {
        specs.insert_text(KEY_MASK_TYPE, "full face");
    } else if haystack.contains("nasal") {
        specs.insert_text(KEY_MASK_TYPE, "nasal");
    }

    if let Some(caps) = PRESSURE_RANGE.captures(text) {
        specs.insert_text(KEY_PRESSURE, format!("{}-{} cmH2O", &caps[1], &caps[2]));
    } else if let Some(caps) = PRESSURE.captures(text) {
        specs.insert_text(KEY_PRESSURE, format!("{} cmH2O", &caps[1]));
    }

    let add_ons: Vec<String> = ADD_ONS
        .iter()
        .filter(|addon| haystack.contains(*addon))
        .map(|addon| addon.to_string())
        .collect();
    if !add_ons.is_empty() {
        specs.insert_list(KEY_ADD_ONS, add_ons);
    }

    if let Some(caps) = AHI_QUALIFIER.captures(text) {
        specs.insert_text(KEY_QUALIFIER, format!(">{}", &caps[1]));
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::SpecValue;

    #[test]
    fn full_face_mask_and_add_ons() {
        let specs = extract("CPAP with full face mask and humidifier. AHI > 20.");

        assert_eq!(
            specs.get(KEY_MASK_TYPE),
            Some(&SpecValue::Text("full face".to_string()))
        );
        assert_eq!(
            specs.get(KEY_ADD_ONS),
            Some(&SpecValue::List(vec!["humidifier".to_string()]))
        );
        assert_eq!(
            specs.get(KEY_QUALIFIER),
            Some(&SpecValue::Text(">20".to_string()))
        );
    }

    #[test]
    fn nasal_mask_and_pressure() {
        let specs = extract("CPAP with nasal mask, set at 10 cmH2O");

        assert_eq!(
            specs.get(KEY_MASK_TYPE),
            Some(&SpecValue::Text("nasal".to_string()))
        );
        assert_eq!(
            specs.get(KEY_PRESSURE),
            Some(&SpecValue::Text("10 cmH2O".to_string()))
        );
    }

    #[test]
    fn pressure_range() {
        let specs = extract("BiPAP titrated to 10-15 cmH2O");
        assert_eq!(
            specs.get(KEY_PRESSURE),
            Some(&SpecValue::Text("10-15 cmH2O".to_string()))
        );
    }

    #[test]
    fn pressure_spacing_variants() {
        let specs = extract("pressure 9.5 cm H2O nightly");
        assert_eq!(
            specs.get(KEY_PRESSURE),
            Some(&SpecValue::Text("9.5 cmH2O".to_string()))
        );
    }

    #[test]
    fn both_add_ons_collected() {
        let specs = extract("CPAP with humidifier and heated tube");
        assert_eq!(
            specs.get(KEY_ADD_ONS),
            Some(&SpecValue::List(vec![
                "humidifier".to_string(),
                "heated tube".to_string()
            ]))
        );
    }

    #[test]
    fn nothing_recognized() {
        let specs = extract("CPAP ordered");
        assert!(specs.is_empty());
    }
}
