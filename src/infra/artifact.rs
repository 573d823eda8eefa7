// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the fitted model as ONE binary file.
//
// What gets saved:
//   ModelArtifact {
//       normalizer_version,   ← rules the vocabulary was built with
//       classifier,           ← LogisticRegression
//       vectorizer,           ← TfidfVectorizer
//   }
//
// Encoding: bincode, fields in the order above. The pair is
// always read back as (classifier, vectorizer). Loading decodes
// from the in-memory file bytes, so a bad length prefix fails
// the decode instead of sizing an allocation.
//
// Every training run overwrites the file wholesale; there is no
// versioning beyond the normaliser check.
//
// Loading fails if the file is missing or corrupt, if it was
// written under a different normaliser version, if the vectorizer
// vocabulary and IDF table are out of step, or if the classifier
// and vectorizer disagree on the feature count.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::normalizer::NORMALIZER_VERSION;
use crate::ml::model::LogisticRegression;
use crate::ml::vectorizer::TfidfVectorizer;

/// The serialised (classifier, vectorizer) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub normalizer_version: u32,
    pub classifier:         LogisticRegression,
    pub vectorizer:         TfidfVectorizer,
}

impl ModelArtifact {
    /// Pair a classifier with its vectorizer under the current normaliser.
    pub fn new(classifier: LogisticRegression, vectorizer: TfidfVectorizer) -> Self {
        Self {
            normalizer_version: NORMALIZER_VERSION,
            classifier,
            vectorizer,
        }
    }

    fn check_consistency(&self) -> Result<()> {
        if self.normalizer_version != NORMALIZER_VERSION {
            bail!(
                "artifact was trained with normaliser v{} but this build uses v{}; retrain the model",
                self.normalizer_version,
                NORMALIZER_VERSION,
            );
        }

        if !self.vectorizer.is_fitted() {
            bail!("artifact vectorizer was never fitted");
        }
        let vocabulary = self.vectorizer.vocabulary();
        let n_idf      = self.vectorizer.idf().len();
        if vocabulary.len() != n_idf {
            bail!(
                "vectorizer has {} vocabulary terms but {} IDF weights",
                vocabulary.len(),
                n_idf,
            );
        }
        if let Some((term, &idx)) = vocabulary.iter().find(|(_, &idx)| idx >= n_idf) {
            bail!("vocabulary term '{}' maps to column {} of {}", term, idx, n_idf);
        }

        let clf     = &self.classifier;
        let classes = clf.classes().len();
        if classes == 0
            || clf.intercept().len() != classes
            || clf.coef().len() != classes * clf.num_features()
        {
            bail!("artifact classifier parameters are inconsistent");
        }
        if clf.num_features() != self.vectorizer.num_features() {
            bail!(
                "classifier expects {} features but vectorizer produces {}",
                clf.num_features(),
                self.vectorizer.num_features(),
            );
        }
        Ok(())
    }
}

/// Reads and writes the artifact file at a fixed path.
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `artifact`, replacing any previous file.
    /// Parent directories are created if needed.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create artifact '{}'", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, artifact)
            .with_context(|| format!("Cannot serialise artifact to '{}'", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Cannot flush artifact '{}'", self.path.display()))?;

        tracing::info!("Saved model artifact to '{}'", self.path.display());
        Ok(())
    }

    /// Read the artifact back and verify it can serve predictions.
    pub fn load(&self) -> Result<ModelArtifact> {
        let bytes = fs::read(&self.path).with_context(|| {
            format!(
                "Cannot open artifact '{}'. Have you run 'train' first?",
                self.path.display()
            )
        })?;

        let artifact: ModelArtifact = bincode::deserialize(&bytes)
            .with_context(|| format!("Artifact '{}' is corrupt", self.path.display()))?;

        artifact
            .check_consistency()
            .with_context(|| format!("Artifact '{}' cannot be used", self.path.display()))?;

        tracing::debug!("Loaded model artifact from '{}'", self.path.display());
        Ok(artifact)
    }
}
