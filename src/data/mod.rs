// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the raw CSV file to labelled feature vectors.
//
//   medquad.csv
//       │
//       ▼
//   CsvLoader         → reads rows, finds question/answer columns
//       │
//       ▼
//   DatasetCleaner    → drops missing + duplicate rows, truncates
//       │
//       ▼
//   TextNormalizer    → lower-case, strip punctuation, stop words,
//       │               lemmatize (shared with inference)
//       ▼
//   TfidfVectorizer   → (ml layer) question → sparse feature vector
//       │
//       ▼
//   LabeledDataset    → feature vector + answer label
//       │
//       ▼
//   split_train_test  → seeded train / test partitions

/// Loads question/answer rows from a CSV file
pub mod loader;

/// Drops missing and duplicate rows, applies the record cap
pub mod preprocessor;

/// The shared text normalisation routine
pub mod normalizer;

/// English stop-word list
pub mod stopwords;

/// Rule-based noun lemmatizer
pub mod lemmatizer;

/// Labelled feature vectors
pub mod dataset;

/// Seeded train/test split
pub mod splitter;
