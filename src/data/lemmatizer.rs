// ============================================================
// Layer 4 — Noun Lemmatizer
// ============================================================
// Reduces a lower-cased token to its dictionary (noun) form:
//
//   "symptoms"  → "symptom"
//   "allergies" → "allergy"
//   "glasses"   → "glass"
//   "children"  → "child"
//   "diabetes"  → "diabetes"   (invariant, not a plural)
//
// Lookup order for one reduction step:
//   1. irregular plurals table
//   2. invariant words (end in -s but are already a lemma)
//   3. suffix rules, most specific first
//
// Steps are repeated until the word stops changing, so the
// output is always a fixed point: lemmatize(lemmatize(w)) ==
// lemmatize(w). Every rule shortens the word or maps it to a
// word that is not itself a table key, so the loop terminates.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static IRREGULAR_PLURALS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("children",    "child"),
        ("feet",        "foot"),
        ("teeth",       "tooth"),
        ("mice",        "mouse"),
        ("lice",        "louse"),
        ("geese",       "goose"),
        ("men",         "man"),
        ("women",       "woman"),
        ("oxen",        "ox"),
        ("data",        "datum"),
        ("criteria",    "criterion"),
        ("phenomena",   "phenomenon"),
        ("bacteria",    "bacterium"),
        ("larvae",      "larva"),
        ("vertebrae",   "vertebra"),
        ("fungi",       "fungus"),
        ("nuclei",      "nucleus"),
        ("stimuli",     "stimulus"),
        ("indices",     "index"),
        ("matrices",    "matrix"),
        ("appendices",  "appendix"),
        ("diagnoses",   "diagnosis"),
        ("prognoses",   "prognosis"),
        ("analyses",    "analysis"),
        ("crises",      "crisis"),
        ("theses",      "thesis"),
        ("metastases",  "metastasis"),
    ]
    .into_iter()
    .collect()
});

static INVARIANT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "diabetes", "herpes", "rabies", "measles", "mumps", "scabies", "rickets",
        "shingles", "series", "species", "news", "lens", "pancreas", "atlas",
        "bias", "canvas", "gas", "yes", "aids", "feces", "faeces", "genitalia",
        "means", "physics", "genetics", "diagnostics", "mathematics", "economics",
    ]
    .into_iter()
    .collect()
});

/// Lemmatize a single lower-cased token.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();
    while let Some(next) = reduce_once(&current) {
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Apply at most one reduction rule. `None` means `word` is already a lemma.
fn reduce_once(word: &str) -> Option<String> {
    if let Some(lemma) = IRREGULAR_PLURALS.get(word) {
        return Some((*lemma).to_string());
    }
    if INVARIANT_WORDS.contains(word) {
        return None;
    }

    // Very short words ("gas", "bus") and non-plurals are left alone
    if word.chars().count() < 4 || !word.ends_with('s') {
        return None;
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }

    // All suffixes below are ASCII, so byte slicing stays on a char boundary
    let len = word.len();

    if word.ends_with("sses")
        || word.ends_with("xes")
        || word.ends_with("zzes")
        || word.ends_with("shes")
    {
        return Some(word[..len - 2].to_string());
    }

    if word.ends_with("ies") && word.chars().count() > 4 {
        return Some(format!("{}y", &word[..len - 3]));
    }

    // "headaches" → "headache", but "branches" → "branch"
    if word.ends_with("ches") && !word.ends_with("aches") {
        return Some(word[..len - 2].to_string());
    }

    Some(word[..len - 1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemmatize("symptoms"), "symptom");
        assert_eq!(lemmatize("causes"), "cause");
        assert_eq!(lemmatize("diseases"), "disease");
        assert_eq!(lemmatize("days"), "day");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(lemmatize("allergies"), "allergy");
        assert_eq!(lemmatize("glasses"), "glass");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("rashes"), "rash");
        assert_eq!(lemmatize("branches"), "branch");
        assert_eq!(lemmatize("headaches"), "headache");
        assert_eq!(lemmatize("ties"), "tie");
    }

    #[test]
    fn test_irregular_and_invariant() {
        assert_eq!(lemmatize("children"), "child");
        assert_eq!(lemmatize("teeth"), "tooth");
        assert_eq!(lemmatize("diagnoses"), "diagnosis");
        assert_eq!(lemmatize("diabetes"), "diabetes");
        assert_eq!(lemmatize("measles"), "measles");
    }

    #[test]
    fn test_words_that_only_look_plural() {
        for w in ["virus", "stress", "arthritis", "bus", "gas", "status"] {
            assert_eq!(lemmatize(w), w);
        }
    }

    #[test]
    fn test_non_ascii_word_ending_in_s() {
        assert_eq!(lemmatize("cafés"), "café");
    }

    #[test]
    fn test_lemma_is_a_fixed_point() {
        let words = [
            "symptoms", "allergies", "glasses", "children", "mens", "headaches",
            "boxes", "buzzes", "diagnoses", "diabetes", "treatments", "kidneys",
            "series", "ties", "women", "data", "viruses", "stresses",
        ];
        for w in words {
            let once = lemmatize(w);
            assert_eq!(lemmatize(&once), once, "not stable for {w}");
        }
    }

    #[test]
    fn test_chained_reduction_reaches_table_entry() {
        // "mens" → "men" → "man"
        assert_eq!(lemmatize("mens"), "man");
    }
}
