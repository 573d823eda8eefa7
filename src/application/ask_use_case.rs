// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// Loads the saved artifact once and answers questions from the
// command line, through the same Inferencer the HTTP service
// uses.

use anyhow::{bail, Result};

use crate::domain::traits::QuestionAnswerer;
use crate::infra::artifact::ArtifactStore;
use crate::ml::inferencer::Inferencer;

pub struct AskUseCase {
    inferencer: Inferencer,
}

impl AskUseCase {
    pub fn new(artifact_path: &str) -> Result<Self> {
        let inferencer = Inferencer::from_store(&ArtifactStore::new(artifact_path))?;
        Ok(Self { inferencer })
    }

    pub fn from_inferencer(inferencer: Inferencer) -> Self {
        Self { inferencer }
    }
}

impl QuestionAnswerer for AskUseCase {
    fn answer(&self, question: &str) -> Result<String> {
        if question.is_empty() {
            bail!("No input provided");
        }
        Ok(self.inferencer.predict(question).to_string())
    }
}
