// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// The single normalisation routine shared by training and
// inference. The vectorizer vocabulary is learned from its
// output, so any change here must bump NORMALIZER_VERSION:
// artifacts record the version they were trained with and
// refuse to load under a different one.
//
// Steps (applied in order):
//   1. Lower-case (Unicode aware)
//   2. Delete ASCII punctuation   "don't" → "dont"
//   3. Split on whitespace
//   4. Drop English stop words
//   5. Lemmatize each token       "symptoms" → "symptom"
//   6. Drop tokens whose lemma is a stop word
//   7. Join with single spaces
//
// Normalising already-normalised text is a no-op.
//
// Example:
//   "What are the symptoms of Diabetes?" → "symptom diabetes"

use crate::data::lemmatizer::lemmatize;
use crate::data::stopwords::is_stop_word;

/// Version of the normalisation rules. Stored in every artifact.
pub const NORMALIZER_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalise raw text into a space-joined token string.
    /// Empty or all-stop-word input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        lowered
            .split_whitespace()
            .filter(|token| !is_stop_word(token))
            .map(lemmatize)
            .filter(|lemma| !is_stop_word(lemma))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalise a batch of texts, preserving order.
    pub fn normalize_all<'a, I>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().map(|t| self.normalize(t)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("What is Diabetes?"), "diabetes");
        assert_eq!(n.normalize("HIGH blood-pressure!!!"), "high bloodpressure");
    }

    #[test]
    fn test_apostrophes_are_deleted_not_split() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("Parkinson's disease"), "parkinson disease");
    }

    #[test]
    fn test_removes_stop_words_and_lemmatizes() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.normalize("What are the symptoms of allergies in children?"),
            "symptom allergy child"
        );
    }

    #[test]
    fn test_empty_and_stop_word_only_input() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   \t\n "), "");
        assert_eq!(n.normalize("What is the?"), "");
        assert_eq!(n.normalize("?!..."), "");
    }

    #[test]
    fn test_collapses_whitespace() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("  blood \n\t sugar  "), "blood sugar");
    }

    #[test]
    fn test_case_and_punctuation_variants_agree() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("What is diabetes?"), n.normalize("what is diabetes"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = TextNormalizer::new();
        let samples = [
            "What are the symptoms of Glaucoma?",
            "Who is at risk for High Blood Pressure? ?",
            "How many people are affected by Parkinson's Disease?",
            "What causes headaches, rashes & allergies?",
            "Are there any treatments for MENS' health issues?",
            "ΣΊΣΥΦΟΣ café Straße",
            "the the the",
            "",
        ];
        for s in samples {
            let once = n.normalize(s);
            assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let n   = TextNormalizer::new();
        let out = n.normalize_all(["Kidneys?", "the", "Lungs"]);
        assert_eq!(out, vec!["kidney", "", "lung"]);
    }
}
