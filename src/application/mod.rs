// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No ML math here (Layer 5)
//   - No printing or HTTP here (Layer 1)
//   - Only workflow coordination

// The offline training workflow
pub mod train_use_case;

// One-shot question answering from a saved artifact
pub mod ask_use_case;
