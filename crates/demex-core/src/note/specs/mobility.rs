//! Wheelchair and walker specification extraction.

use crate::models::order::Specifications;

use super::{KEY_CATEGORY, KEY_TYPE};

pub fn extract_wheelchair(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    if haystack.contains("electric") || haystack.contains("powered") {
        specs.insert_text(KEY_TYPE, "electric");
    } else if haystack.contains("manual") {
        specs.insert_text(KEY_TYPE, "manual");
    }

    if haystack.contains("transport") {
        specs.insert_text(KEY_CATEGORY, "transport");
    }

    specs
}

pub fn extract_walker(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    if haystack.contains("wheeled") || haystack.contains("rollator") {
        specs.insert_text(KEY_TYPE, "wheeled");
    } else if haystack.contains("standard") {
        specs.insert_text(KEY_TYPE, "standard");
    }

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::SpecValue;

    #[test]
    fn wheelchair_types() {
        assert_eq!(
            extract_wheelchair("manual wheelchair").get(KEY_TYPE),
            Some(&SpecValue::Text("manual".to_string()))
        );
        assert_eq!(
            extract_wheelchair("powered wheelchair").get(KEY_TYPE),
            Some(&SpecValue::Text("electric".to_string()))
        );
        // Powered wins when both adjectives appear.
        assert_eq!(
            extract_wheelchair("electric wheelchair, not manual").get(KEY_TYPE),
            Some(&SpecValue::Text("electric".to_string()))
        );
    }

    #[test]
    fn transport_category() {
        let specs = extract_wheelchair("transport wheelchair for appointments");
        assert_eq!(
            specs.get(KEY_CATEGORY),
            Some(&SpecValue::Text("transport".to_string()))
        );
    }

    #[test]
    fn walker_types() {
        assert_eq!(
            extract_walker("wheeled walker").get(KEY_TYPE),
            Some(&SpecValue::Text("wheeled".to_string()))
        );
        assert_eq!(
            extract_walker("needs a rollator").get(KEY_TYPE),
            Some(&SpecValue::Text("wheeled".to_string()))
        );
        assert_eq!(
            extract_walker("standard walker").get(KEY_TYPE),
            Some(&SpecValue::Text("standard".to_string()))
        );
        assert!(extract_walker("a walker").is_empty());
    }
}
