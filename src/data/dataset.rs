use std::collections::BTreeSet;

use crate::ml::vectorizer::SparseVector;

/// One vectorised training sample: TF-IDF features of the cleaned
/// question, labelled with the verbatim answer string.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample {
    pub features: SparseVector,
    pub answer:   String,
}

impl LabeledExample {
    pub fn new(features: SparseVector, answer: impl Into<String>) -> Self {
        Self { features, answer: answer.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    examples: Vec<LabeledExample>,
}

impl LabeledDataset {
    pub fn new(examples: Vec<LabeledExample>) -> Self { Self { examples } }

    pub fn examples(&self) -> &[LabeledExample] { &self.examples }


    pub fn len(&self) -> usize { self.examples.len() }

    pub fn is_empty(&self) -> bool { self.examples.is_empty() }

    /// Distinct answers in sorted order; these become the class labels.
    pub fn classes(&self) -> Vec<String> {
        self.examples
            .iter()
            .map(|e| e.answer.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.examples.iter().map(|e| e.answer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_sorted_and_unique() {
        let ds = LabeledDataset::new(vec![
            LabeledExample::new(SparseVector::default(), "b"),
            LabeledExample::new(SparseVector::default(), "a"),
            LabeledExample::new(SparseVector::default(), "b"),
        ]);
        assert_eq!(ds.classes(), vec!["a", "b"]);
        assert_eq!(ds.len(), 3);
    }
}
