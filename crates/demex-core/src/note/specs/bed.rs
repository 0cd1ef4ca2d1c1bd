//! Hospital bed specification extraction.

use crate::models::order::Specifications;

use super::{KEY_MATTRESS_INCLUDED, KEY_TYPE};

pub fn extract(text: &str) -> Specifications {
    let haystack = text.to_lowercase();
    let mut specs = Specifications::new();

    if haystack.contains("electric") || haystack.contains("adjustable") {
        specs.insert_text(KEY_TYPE, "electric adjustable");
    }

    if haystack.contains("mattress") {
        specs.insert_flag(KEY_MATTRESS_INCLUDED, true);
    }

    specs
}
