//! Résumé field inference.
//!
//! The engine runs the rule extractors in a fixed order over extracted
//! text; the fallback policy then fills the fields a form requires.

pub mod fallback;
mod parser;
pub mod rules;

pub use fallback::FallbackPolicy;
pub use parser::{FieldInferenceEngine, InferenceResult};
