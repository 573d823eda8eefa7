// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits:
//   - CsvLoader implements DatasetSource
//   - AskUseCase implements QuestionAnswerer

use anyhow::Result;
use crate::domain::qa_pair::QaRecord;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce raw question/answer records.
///
/// Records may still contain missing fields and duplicates;
/// cleaning happens later in the data layer.
pub trait DatasetSource {
    /// Load every raw record from this source, in source order.
    fn load_records(&self) -> Result<Vec<RawRecord>>;
}

/// A dataset row before cleaning. `None` marks a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub question: Option<String>,
    pub answer:   Option<String>,
}

impl RawRecord {
    /// Convert into a QaRecord if both fields are present.
    pub fn into_complete(self) -> Option<QaRecord> {
        match (self.question, self.answer) {
            (Some(question), Some(answer)) => Some(QaRecord { question, answer }),
            _ => None,
        }
    }
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that can answer a natural language question.
///
/// The answer always comes from the closed set of answers seen
/// at training time; there is no "I don't know" fallback.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> Result<String>;
}
