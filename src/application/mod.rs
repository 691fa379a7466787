// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish a
// specific goal (preparing a dataset, inspecting a file).
//
// Rules for this layer:
//   - No JSON layout knowledge here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The full train/validation/test preparation workflow
pub mod prepare_use_case;

// Single-file inspection workflow
pub mod inspect_use_case;
