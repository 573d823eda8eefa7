// ============================================================
// Layer 6 — Infrastructure
// ============================================================
// Disk persistence and evaluation reporting.
//
//   artifact.rs — saves/loads the (classifier, vectorizer) pair
//                 as a single bincode file
//   metrics.rs  — per-class precision / recall / F1 report on
//                 the held-out test set

/// Single-file model artifact
pub mod artifact;

/// Classification report
pub mod metrics;
