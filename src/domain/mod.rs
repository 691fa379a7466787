// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that describe the
// normalised dataset, independent of any on-disk schema.
//
// Rules for this layer:
//   - NO file I/O
//   - NO knowledge of the challenge or SQuAD JSON layouts
//   - Only plain Rust types, the error taxonomy and traits
//
// The data layer (Layer 4) turns raw JSON into these types;
// the application layer (Layer 2) hands them to consumers.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// A normalised (question, text, label) record
pub mod example;

// Train / validation / test collections and their summaries
pub mod collection;

// Load modes, source formats and the SQuAD extraction policy
pub mod format;

// Typed error taxonomy for the ingestion core
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
