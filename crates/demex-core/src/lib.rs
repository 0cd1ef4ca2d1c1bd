//! Core library for demex - structured DME order extraction from physician notes.
//!
//! This crate provides:
//! - Field extraction rules over raw note text (demographics, provider, dates)
//! - A device taxonomy and per-device specification extractors
//! - The two-phase note parser (note, then order) with validation gates
//! - An LLM-assisted extraction path with deterministic rule-based fallback

pub mod assist;
pub mod error;
pub mod models;
pub mod note;
pub mod pipeline;

pub use error::{DemexError, ExtractError, Result};
pub use models::config::{ApiConfig, DemexConfig, ExtractionConfig, LlmConfig};
pub use models::note::PhysicianNote;
pub use models::order::{DeviceOrder, DeviceType, SpecValue, Specifications};
pub use note::input::unwrap_note_text;
pub use note::parser::{NoteExtraction, NoteParser, RuleNoteParser};
pub use note::taxonomy::detect_device_type;
pub use note::validate::{FieldTarget, ValidationIssue};
pub use pipeline::OrderPipeline;

/// Re-export completion types.
pub use demex_llm::{CompletionClient, LlmError, MockClient, OllamaClient};
