//! Data model for outline inference.
//!
//! The input side mirrors what the extraction collaborator delivers
//! (fragments grouped by page); the output side is the title-plus-outline
//! artifact. Everything in between (candidates, metrics) lives in the
//! engine and is transient.

mod outline;
mod span;

pub use outline::{DocumentResult, HeadingLevel, HeadingRecord};
pub use span::{ExtractedDocument, ExtractedPage, RawFragment, Span};
