// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file output that does not belong to the data
// or application layers:
//
//   export.rs — Split export
//               Writes each normalised collection as JSON Lines
//               (one Example per line) for the downstream
//               classifier, and records the configuration that
//               produced them as prepare_config.json.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// JSON Lines export of splits and the run configuration
pub mod export;
