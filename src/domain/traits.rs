// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Every source format implements the same contract: take a
// parsed JSON document, return the examples it yields plus a
// count of records that had to be dropped.
//
// The normaliser only talks to `RecordExtractor`, so a new
// dataset layout is one more implementation, not a new loader.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use serde_json::Value;

use crate::domain::error::ShapeError;
use crate::domain::example::Example;
use crate::domain::format::LoadMode;

/// Result of running one extractor over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Examples in source order
    pub examples: Vec<Example>,

    /// Records (or question units) dropped because they could
    /// not be resolved into a complete Example
    pub skipped: usize,
}

impl Extraction {
    pub fn push(&mut self, example: Example) {
        self.examples.push(example);
    }

    pub fn skip(&mut self, count: usize) {
        self.skipped += count;
    }
}

// ─── RecordExtractor ──────────────────────────────────────────────────────────
/// Any component that can turn a raw document into examples.
///
/// Implementations:
///   - SourceFormat → the four challenge / SQuAD layouts
pub trait RecordExtractor {
    /// Extract examples from `document`.
    ///
    /// Fails only when the document's top-level shape is wrong;
    /// individual bad records are counted in `Extraction::skipped`.
    fn extract(&self, document: Value, mode: LoadMode) -> Result<Extraction, ShapeError>;
}
