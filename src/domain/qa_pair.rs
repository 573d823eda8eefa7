// ============================================================
// Layer 3 — QaRecord Domain Type
// ============================================================
// One row of the training dataset after cleaning:
//   - the question a user might ask
//   - the answer string, which doubles as the class label
//
// Every distinct answer is one class of the classifier, so the
// answer text is kept verbatim (no trimming, no normalisation).
// Two records are duplicates only if BOTH fields match exactly.

/// A labelled question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QaRecord {
    /// The natural language question
    pub question: String,

    /// The answer returned when this question is predicted
    pub answer: String,
}

impl QaRecord {
    /// Create a new QaRecord.
    ///
    /// Example:
    ///   let r = QaRecord::new("What is diabetes?", "A chronic condition...");
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer:   answer.into(),
        }
    }
}
