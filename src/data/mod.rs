// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Turns dataset files into normalised Examples.
//
//   dataset file (.json)
//       │
//       ▼
//   reader            → missing file = nothing, bad JSON = error
//       │
//       ▼
//   formats           → SourceFormat extractors (flat, nested,
//       │               SQuAD span-text, SQuAD first-answer)
//       ▼
//   normalizer        → appends to train / validation / test,
//       │               reshuffles with one seeded generator
//       ▼
//   splitter          → carves validation out of train when
//                       no dev file exists
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads dataset files and decodes their text encoding
pub mod reader;

/// RecordExtractor implementations for every SourceFormat
pub mod formats;

/// Owns the three collections and drives loading + shuffling
pub mod normalizer;

/// Seeded shuffle-and-split into train/validation sets
pub mod splitter;
