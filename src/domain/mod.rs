// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that name the core concepts
// of the chatbot: a question/answer record, a source of such
// records, and something that can answer a question.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits

// A question-answer record as read from the dataset
pub mod qa_pair;

// Core abstractions (traits) that other layers implement
pub mod traits;
