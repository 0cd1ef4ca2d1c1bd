//! Oxygen therapy specification extraction.

use regex::Regex;

use crate::models::order::Specifications;
use crate::note::rules::patterns::{FLOW_DELIVERING, FLOW_LPM, FLOW_L_PER_MINUTE, FLOW_SLASH};

use super::{KEY_DELIVERY_METHOD, KEY_LITERS, KEY_USAGE};

/// Usage terms collected in this fixed order.
const USAGE_TERMS: &[&str] = &["sleep", "exertion", "continuous"];

pub fn extract(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    // Flow notations tried in fixed order; every hit normalizes to "N L/min".
    let flow_patterns: [&Regex; 4] = [&FLOW_L_PER_MINUTE, &FLOW_LPM, &FLOW_SLASH, &FLOW_DELIVERING];
    if let Some(rate) = flow_patterns
        .iter()
        .find_map(|pattern| pattern.captures(text).map(|caps| caps[1].to_string()))
    {
        specs.insert_text(KEY_LITERS, format!("{rate} L/min"));
    }

    if haystack.contains("cannula") {
        specs.insert_text(KEY_DELIVERY_METHOD, "nasal cannula");
    } else if haystack.contains("mask") {
        specs.insert_text(KEY_DELIVERY_METHOD, "oxygen mask");
    } else if haystack.contains("tank") {
        specs.insert_text(KEY_DELIVERY_METHOD, "oxygen tank");
    }

    let usage: Vec<&str> = USAGE_TERMS
        .iter()
        .copied()
        .filter(|term| haystack.contains(term))
        .collect();
    if !usage.is_empty() {
        specs.insert_text(KEY_USAGE, usage.join(" and "));
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::SpecValue;

    fn liters(specs: &Specifications) -> Option<String> {
        match specs.get(KEY_LITERS) {
            Some(SpecValue::Text(rate)) => Some(rate.clone()),
            _ => None,
        }
    }

    #[test]
    fn flow_notations_normalize_identically() {
        for text in [
            "oxygen at 2.5 L per minute",
            "oxygen at 2.5 LPM",
            "oxygen at 2.5 L/min",
            "oxygen concentrator delivering 2.5 L",
        ] {
            let specs = extract(text);
            assert_eq!(liters(&specs).as_deref(), Some("2.5 L/min"), "{text}");
        }
    }

    #[test]
    fn whole_number_flow() {
        let specs = extract("home oxygen 2 liters per minute via cannula");
        assert_eq!(liters(&specs).as_deref(), Some("2 L/min"));
    }

    #[test]
    fn delivery_method_priority() {
        assert_eq!(
            extract("oxygen via nasal cannula").get(KEY_DELIVERY_METHOD),
            Some(&SpecValue::Text("nasal cannula".to_string()))
        );
        assert_eq!(
            extract("oxygen by mask at night").get(KEY_DELIVERY_METHOD),
            Some(&SpecValue::Text("oxygen mask".to_string()))
        );
        assert_eq!(
            extract("portable oxygen tank").get(KEY_DELIVERY_METHOD),
            Some(&SpecValue::Text("oxygen tank".to_string()))
        );
        // Cannula wins over a later "tank" mention.
        assert_eq!(
            extract("oxygen via cannula, backup tank at home").get(KEY_DELIVERY_METHOD),
            Some(&SpecValue::Text("nasal cannula".to_string()))
        );
    }

    #[test]
    fn usage_union_in_fixed_order() {
        let specs = extract("oxygen with exertion and during sleep");
        assert_eq!(
            specs.get(KEY_USAGE),
            Some(&SpecValue::Text("sleep and exertion".to_string()))
        );

        let specs = extract("continuous oxygen");
        assert_eq!(
            specs.get(KEY_USAGE),
            Some(&SpecValue::Text("continuous".to_string()))
        );
    }

    #[test]
    fn missing_fields_are_omitted() {
        let specs = extract("oxygen evaluation pending");
        assert!(!specs.contains(KEY_LITERS));
        assert!(!specs.contains(KEY_DELIVERY_METHOD));
    }
}
