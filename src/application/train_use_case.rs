// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load CSV rows                 (Layer 4 - data)
//   Step 2: Drop missing/duplicates, cap  (Layer 4 - data)
//   Step 3: Normalise questions           (Layer 4 - data)
//   Step 4: Fit TF-IDF on all questions   (Layer 5 - ml)
//   Step 5: Seeded train/test split       (Layer 4 - data)
//   Step 6: Fit logistic regression       (Layer 5 - ml)
//   Step 7: Evaluate on the test split    (Layer 6 - infra)
//   Step 8: Save the artifact             (Layer 6 - infra)
//
// Any error aborts the run; nothing is saved unless every step
// before Step 8 succeeded. Evaluation never blocks the save.

use anyhow::{bail, Result};

use crate::data::{
    dataset::{LabeledDataset, LabeledExample},
    loader::CsvLoader,
    normalizer::TextNormalizer,
    preprocessor::{CleaningStats, DatasetCleaner},
    splitter::split_train_test,
};
use crate::domain::traits::DatasetSource;
use crate::infra::{
    artifact::{ArtifactStore, ModelArtifact},
    metrics::ClassificationReport,
};
use crate::ml::{
    inferencer::Inferencer,
    trainer::{fit_classifier, ClassifierConfig},
    vectorizer::TfidfVectorizer,
};

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub dataset_path:  String,
    pub artifact_path: String,
    /// Keep only the first N cleaned records; `None` keeps all
    pub max_records:   Option<usize>,
    /// Vocabulary cap; `None` keeps every term
    pub max_features:  Option<usize>,
    pub test_fraction: f64,
    pub seed:          u64,
    pub classifier:    ClassifierConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:  "chatbot_data/medquad.csv".to_string(),
            artifact_path: "health_chatbot_model.bin".to_string(),
            max_records:   Some(500),
            max_features:  Some(crate::ml::vectorizer::DEFAULT_MAX_FEATURES),
            test_fraction: 0.2,
            seed:          42,
            classifier:    ClassifierConfig::default(),
        }
    }
}

/// What a successful run produced.
pub struct TrainOutcome {
    pub cleaning:     CleaningStats,
    pub train_size:   usize,
    pub test_size:    usize,
    pub num_features: usize,
    /// `None` when the test split was empty
    pub report:       Option<ClassificationReport>,
    /// The in-memory model exactly as it was saved
    pub model:        Inferencer,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Load dataset ──────────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.dataset_path);
        let raw = CsvLoader::new(&cfg.dataset_path).load_records()?;

        // ── Step 2: Clean ─────────────────────────────────────────────────────
        let (records, cleaning) = DatasetCleaner::new(cfg.max_records).clean(raw);
        tracing::info!(
            "Kept {} of {} rows ({} missing, {} duplicate, {} over the cap)",
            cleaning.kept, cleaning.raw, cleaning.missing, cleaning.duplicates, cleaning.truncated,
        );
        if records.is_empty() {
            bail!("dataset '{}' has no usable question/answer rows", cfg.dataset_path);
        }

        // ── Step 3: Normalise questions ───────────────────────────────────────
        tracing::info!("Cleaning questions");
        let normalizer = TextNormalizer::new();
        let questions  = normalizer.normalize_all(records.iter().map(|r| r.question.as_str()));

        // ── Step 4: Vectorise ─────────────────────────────────────────────────
        tracing::info!("Vectorizing text");
        let mut vectorizer = TfidfVectorizer::new(cfg.max_features);
        let features       = vectorizer.fit_transform(&questions)?;
        let num_features   = vectorizer.num_features();
        tracing::info!("Vocabulary size: {}", num_features);

        let examples: Vec<LabeledExample> = features
            .into_iter()
            .zip(records)
            .map(|(x, record)| LabeledExample::new(x, record.answer))
            .collect();

        // ── Step 5: Train/test split ──────────────────────────────────────────
        let (train, test) = split_train_test(examples, cfg.test_fraction, cfg.seed);
        let train = LabeledDataset::new(train);
        let test  = LabeledDataset::new(test);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 6: Fit classifier ────────────────────────────────────────────
        tracing::info!("Training logistic regression model");
        let classifier = fit_classifier(&train, num_features, &cfg.classifier)?;

        // ── Step 7: Evaluate ──────────────────────────────────────────────────
        let report = if test.is_empty() {
            tracing::info!("Test split is empty; skipping evaluation");
            None
        } else {
            let y_pred: Vec<&str> = test
                .examples()
                .iter()
                .map(|e| classifier.predict(&e.features))
                .collect();
            let y_true: Vec<&str> = test.answers().collect();
            let report = ClassificationReport::from_predictions(&y_true, &y_pred);
            tracing::info!("Test accuracy: {:.4}", report.accuracy);
            Some(report)
        };

        // ── Step 8: Save ──────────────────────────────────────────────────────
        let artifact = ModelArtifact::new(classifier, vectorizer);
        ArtifactStore::new(&cfg.artifact_path).save(&artifact)?;

        Ok(TrainOutcome {
            cleaning,
            train_size: train.len(),
            test_size:  test.len(),
            num_features,
            report,
            model: Inferencer::from_artifact(artifact),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_for(dir: &Path, csv: &str) -> TrainConfig {
        let dataset = dir.join("data.csv");
        fs::write(&dataset, csv).unwrap();
        TrainConfig {
            dataset_path:  dataset.to_string_lossy().into_owned(),
            artifact_path: dir.join("model.bin").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        }
    }

    const MEDICAL_CSV: &str = "\
question,answer
What is diabetes?,Diabetes is a disease of high blood sugar.
What causes diabetes?,Diabetes is a disease of high blood sugar.
What is asthma?,Asthma inflames the airways.
What are the symptoms of asthma?,Asthma inflames the airways.
What is glaucoma?,Glaucoma damages the optic nerve.
Who gets glaucoma?,Glaucoma damages the optic nerve.
What is anemia?,Anemia is a lack of red blood cells.
How is anemia treated?,Anemia is a lack of red blood cells.
What is arthritis?,Arthritis is joint inflammation.
What are arthritis treatments?,Arthritis is joint inflammation.
";

    #[test]
    fn test_single_pair_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(
            dir.path(),
            "question,answer\nWhat is diabetes?,A chronic condition affecting blood sugar.\n",
        );

        let outcome = TrainUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(outcome.train_size, 1);
        assert_eq!(outcome.test_size, 0);
        assert!(outcome.report.is_none());

        let loaded = Inferencer::from_store(&ArtifactStore::new(&cfg.artifact_path)).unwrap();
        assert_eq!(
            loaded.predict("what is diabetes"),
            "A chronic condition affecting blood sugar."
        );
    }

    #[test]
    fn test_predictions_stay_in_the_label_set() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = config_for(dir.path(), MEDICAL_CSV);
        let outcome = TrainUseCase::new(cfg).execute().unwrap();

        assert_eq!(outcome.train_size + outcome.test_size, 10);
        assert!(outcome.report.is_some());

        let known: Vec<&str> = MEDICAL_CSV.lines().skip(1).filter_map(|l| l.split_once(',')).map(|(_, a)| a).collect();
        for msg in ["diabetes", "glaucoma eye", "tell me a joke", "", "???"] {
            let answer = outcome.model.predict(msg);
            assert!(known.contains(&answer), "novel answer {answer:?}");
        }
    }

    #[test]
    fn test_saved_model_matches_in_memory_model() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = config_for(dir.path(), MEDICAL_CSV);
        let outcome = TrainUseCase::new(cfg.clone()).execute().unwrap();
        let loaded  = Inferencer::from_store(&ArtifactStore::new(&cfg.artifact_path)).unwrap();

        for msg in ["What is anemia?", "arthritis pain", "blood sugar", "nothing"] {
            assert_eq!(loaded.predict(msg), outcome.model.predict(msg));
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path(), MEDICAL_CSV);
        let a   = TrainUseCase::new(cfg.clone()).execute().unwrap();
        let b   = TrainUseCase::new(cfg).execute().unwrap();
        assert_eq!(a.model.classifier(), b.model.classifier());
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_record_cap_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig { max_records: Some(4), ..config_for(dir.path(), MEDICAL_CSV) };
        let outcome = TrainUseCase::new(cfg).execute().unwrap();
        assert_eq!(outcome.cleaning.kept, 4);
        assert_eq!(outcome.train_size + outcome.test_size, 4);
    }

    #[test]
    fn test_missing_dataset_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TrainConfig {
            dataset_path:  dir.path().join("absent.csv").to_string_lossy().into_owned(),
            artifact_path: dir.path().join("model.bin").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        assert!(TrainUseCase::new(cfg.clone()).execute().is_err());
        assert!(!Path::new(&cfg.artifact_path).exists());
    }

    #[test]
    fn test_all_stop_word_questions_fail() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_for(dir.path(), "question,answer\nWhat is it?,x\nWho are they?,y\n");
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}
