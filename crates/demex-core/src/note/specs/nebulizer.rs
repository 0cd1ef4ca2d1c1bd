//! Nebulizer specification extraction.

use crate::models::order::Specifications;
use crate::note::rules::patterns::FREQUENCY_PER_DAY;

use super::{KEY_FREQUENCY, KEY_MEDICATION};

pub fn extract(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    if haystack.contains("albuterol") {
        specs.insert_text(KEY_MEDICATION, "albuterol");
    }

    if let Some(caps) = FREQUENCY_PER_DAY.captures(text) {
        specs.insert_text(KEY_FREQUENCY, format!("{} times per day", &caps[1]));
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::SpecValue;

    #[test]
    fn medication_and_frequency() {
        let specs = extract("Nebulizer with albuterol 3 times per day");

        assert_eq!(
            specs.get(KEY_MEDICATION),
            Some(&SpecValue::Text("albuterol".to_string()))
        );
        assert_eq!(
            specs.get(KEY_FREQUENCY),
            Some(&SpecValue::Text("3 times per day".to_string()))
        );
    }

    #[test]
    fn frequency_without_per() {
        let specs = extract("albuterol nebs 4 times a day");
        assert_eq!(
            specs.get(KEY_FREQUENCY),
            Some(&SpecValue::Text("4 times per day".to_string()))
        );
    }

    #[test]
    fn unrecognized_medication_omitted() {
        let specs = extract("Nebulizer with ipratropium twice weekly");
        assert!(specs.is_empty());
    }
}
