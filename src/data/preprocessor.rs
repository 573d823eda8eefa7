// ============================================================
// Layer 4 — Dataset Preprocessor
// ============================================================
// Turns raw CSV rows into the records the model is trained on.
//
// Cleaning steps (applied in order):
//   1. Drop rows with a missing question or answer
//   2. Drop exact duplicate (question, answer) pairs,
//      keeping the first occurrence
//   3. Keep only the first `max_records` records
//
// Row order is preserved throughout, so the same file always
// produces the same cleaned dataset.

use std::collections::HashSet;

use crate::domain::qa_pair::QaRecord;
use crate::domain::traits::RawRecord;

/// Counts reported after cleaning, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub raw:        usize,
    pub missing:    usize,
    pub duplicates: usize,
    pub truncated:  usize,
    pub kept:       usize,
}

pub struct DatasetCleaner {
    /// Upper bound on kept records. `None` keeps everything.
    max_records: Option<usize>,
}

impl DatasetCleaner {
    pub fn new(max_records: Option<usize>) -> Self {
        Self { max_records }
    }

    pub fn clean(&self, raw: Vec<RawRecord>) -> (Vec<QaRecord>, CleaningStats) {
        let mut stats = CleaningStats { raw: raw.len(), ..Default::default() };

        let mut seen    = HashSet::new();
        let mut records = Vec::with_capacity(raw.len());

        for row in raw {
            let Some(record) = row.into_complete() else {
                stats.missing += 1;
                continue;
            };
            if !seen.insert(record.clone()) {
                stats.duplicates += 1;
                continue;
            }
            records.push(record);
        }

        if let Some(limit) = self.max_records {
            stats.truncated = records.len().saturating_sub(limit);
            records.truncate(limit);
        }

        stats.kept = records.len();
        (records, stats)
    }
}

impl Default for DatasetCleaner {
    fn default() -> Self {
        Self::new(None)
    }
}
