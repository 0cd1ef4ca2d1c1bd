//! Note processing: input unwrapping, field rules, taxonomy, device
//! specifications, validation, and the two-phase parser.

pub mod input;
pub mod parser;
pub mod rules;
pub mod specs;
pub mod taxonomy;
pub mod validate;

pub use input::unwrap_note_text;
pub use parser::{NoteExtraction, NoteParser, RuleNoteParser};
