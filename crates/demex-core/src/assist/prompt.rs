//! Prompt construction for assisted order extraction.

/// Build the one-shot extraction prompt for a raw note. The whole order is
/// requested in a single completion; the response contract mirrors the wire
/// shape of a serialized device order.
pub fn build_order_prompt(raw_text: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\nPhysician note:\n---\n");
    prompt.push_str(raw_text);
    prompt.push_str("\n---\n\n");
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract a durable medical equipment order from the physician note below.
Respond with a single JSON object using these snake_case fields:

{
  "device": "CPAP | BiPAP | Oxygen | Nebulizer | Wheelchair | Walker | Hospital Bed",
  "patient_name": "patient's full name",
  "dob": "date of birth exactly as written in the note",
  "diagnosis": "diagnosis exactly as written in the note",
  "ordering_provider": "ordering physician's name",
  "mask_type": "full face | nasal (CPAP/BiPAP only)",
  "pressure": "pressure setting such as 10 cmH2O (CPAP/BiPAP only)",
  "add_ons": ["humidifier", "heated tube"],
  "qualifier": "coverage qualifier such as >20 for AHI (CPAP/BiPAP only)",
  "liters": "flow rate such as 2.5 L/min (Oxygen only)",
  "delivery_method": "nasal cannula | oxygen mask | oxygen tank (Oxygen only)",
  "usage": "sleep and exertion (Oxygen only)",
  "medication": "nebulized medication (Nebulizer only)",
  "frequency": "dosing frequency such as 3 times per day (Nebulizer only)",
  "type": "device subtype (Wheelchair/Walker/Hospital Bed only)",
  "category": "transport (Wheelchair only)",
  "mattress_included": true
}

Rules:
- Copy values from the note; never invent clinical details.
- Omit every field the note does not support.
- "device" is required."#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Output the JSON object only, with no surrounding text or markdown.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_note_and_contract() {
        let prompt = build_order_prompt("Patient needs a CPAP. Ordered by Dr. Cameron.");

        assert!(prompt.contains("Patient needs a CPAP. Ordered by Dr. Cameron."));
        assert!(prompt.contains("\"device\""));
        assert!(prompt.contains("\"mask_type\""));
        assert!(prompt.contains("\"liters\""));
        assert!(prompt.ends_with(OUTPUT_FORMAT_REMINDER));
    }
}
