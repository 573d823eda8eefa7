// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Holds the fitted (classifier, vectorizer) pair and answers
// messages:
//
//   message → TextNormalizer → TfidfVectorizer → argmax → answer
//
// Immutable once built; one instance is shared by every request.

use anyhow::Result;

use crate::data::normalizer::TextNormalizer;
use crate::infra::artifact::{ArtifactStore, ModelArtifact};
use crate::ml::model::LogisticRegression;
use crate::ml::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone)]
pub struct Inferencer {
    classifier: LogisticRegression,
    vectorizer: TfidfVectorizer,
    normalizer: TextNormalizer,
}

impl Inferencer {
    pub fn new(classifier: LogisticRegression, vectorizer: TfidfVectorizer) -> Self {
        Self { classifier, vectorizer, normalizer: TextNormalizer::new() }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self::new(artifact.classifier, artifact.vectorizer)
    }

    /// Load the artifact file and build an Inferencer from it.
    pub fn from_store(store: &ArtifactStore) -> Result<Self> {
        let artifact = store.load()?;
        tracing::info!(
            "Model loaded from '{}': {} classes, {} features",
            store.path().display(),
            artifact.classifier.classes().len(),
            artifact.vectorizer.num_features(),
        );
        Ok(Self::from_artifact(artifact))
    }

    /// Predict the answer for a raw user message.
    /// Always returns one of `classes()`, even for unrelated input.
    pub fn predict(&self, message: &str) -> &str {
        let cleaned  = self.normalizer.normalize(message);
        let features = self.vectorizer.transform(&cleaned);
        if features.is_zero() {
            tracing::debug!("No known terms in '{}'; falling back to the intercepts", message);
        } else {
            tracing::trace!("'{}' → {} active features", cleaned, features.nnz());
        }
        self.classifier.predict(&features)
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Inferencer {
        let mut vectorizer = TfidfVectorizer::new(None);
        vectorizer.fit(&["diabetes", "asthma"]).unwrap();
        // Columns are alphabetical: asthma = 0, diabetes = 1
        let classifier = LogisticRegression::from_parts(
            vec!["about asthma".into(), "about diabetes".into()],
            2,
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0.0, 0.0],
        );
        Inferencer::new(classifier, vectorizer)
    }

    #[test]
    fn test_predict_normalises_input() {
        let inf = tiny();
        assert_eq!(inf.predict("What is DIABETES?"), "about diabetes");
        assert_eq!(inf.predict("asthma!!"), "about asthma");
    }

    #[test]
    fn test_unrelated_input_still_gets_a_known_answer() {
        let inf    = tiny();
        let answer = inf.predict("how do rockets work");
        assert!(inf.classes().iter().any(|c| c == answer));
    }
}
