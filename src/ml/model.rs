// ============================================================
// Layer 5 — Logistic Regression Model
// ============================================================
// Two views of the same classifier:
//
//   SoftmaxRegression<B>  — burn Module used while FITTING.
//                           One Linear layer: logits = x·W + b,
//                           trained with cross-entropy + L2.
//
//   LogisticRegression    — plain, serialisable result used for
//                           PREDICTION. Holds the class labels
//                           (answer strings), a [classes × features]
//                           coefficient matrix and one intercept per
//                           class. No burn types, so the inference
//                           service never needs a tensor backend.
//
// Prediction = argmax over classes of (intercept + coef · x); the
// first class wins a tie. The result is always one of `classes`.

use burn::{
    nn::{Initializer, Linear, LinearConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::ml::vectorizer::SparseVector;

// ─── SoftmaxRegression (burn) ─────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct SoftmaxRegressionConfig {
    pub num_features: usize,
    pub num_classes:  usize,
}

impl SoftmaxRegressionConfig {
    /// Zero-initialised weights.
    pub fn init<B: Backend>(&self, device: &B::Device) -> SoftmaxRegression<B> {
        let linear = LinearConfig::new(self.num_features, self.num_classes)
            .with_initializer(Initializer::Zeros)
            .init(device);
        SoftmaxRegression { linear }
    }
}

#[derive(Module, Debug)]
pub struct SoftmaxRegression<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> SoftmaxRegression<B> {
    /// features: [batch, num_features] → logits: [batch, num_classes]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(features)
    }

    /// Mean cross-entropy plus `0.5 * l2 * ||W||²` (intercepts are not penalised).
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        targets:  Tensor<B, 1, Int>,
        l2:       f64,
    ) -> Tensor<B, 1>
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(features);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits, targets);

        let weight  = self.linear.weight.val();
        let penalty = (weight.clone() * weight).sum().mul_scalar(0.5 * l2);
        ce + penalty
    }
}

// ─── LogisticRegression (fitted) ──────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    classes:      Vec<String>,
    num_features: usize,
    /// Row-major [classes × features]
    coef:         Vec<f32>,
    intercept:    Vec<f32>,
}

impl LogisticRegression {
    /// Build a fitted classifier from raw parameters.
    ///
    /// # Panics
    /// Panics if the parameter shapes do not match `classes` and
    /// `num_features`, or if `classes` is empty.
    pub fn from_parts(
        classes:      Vec<String>,
        num_features: usize,
        coef:         Vec<f32>,
        intercept:    Vec<f32>,
    ) -> Self {
        assert!(!classes.is_empty(), "a classifier needs at least one class");
        assert_eq!(coef.len(), classes.len() * num_features, "coef shape mismatch");
        assert_eq!(intercept.len(), classes.len(), "intercept shape mismatch");
        Self { classes, num_features, coef, intercept }
    }

    /// A classifier that always returns its single class.
    pub fn constant(class: impl Into<String>, num_features: usize) -> Self {
        Self::from_parts(vec![class.into()], num_features, vec![0.0; num_features], vec![0.0])
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn coef(&self) -> &[f32] {
        &self.coef
    }

    pub fn intercept(&self) -> &[f32] {
        &self.intercept
    }

    /// Raw class scores (logits) for one feature vector.
    /// Columns beyond `num_features` are ignored.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f32> {
        self.intercept
            .iter()
            .enumerate()
            .map(|(class, &bias)| {
                let row = &self.coef[class * self.num_features..(class + 1) * self.num_features];
                bias + x
                    .iter()
                    .filter(|(idx, _)| *idx < self.num_features)
                    .map(|(idx, value)| row[idx] * value)
                    .sum::<f32>()
            })
            .collect()
    }

    /// Index of the top-scoring class.
    pub fn predict_index(&self, x: &SparseVector) -> usize {
        let scores = self.decision_function(x);
        let mut best = 0;
        for (class, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = class;
            }
        }
        best
    }

    /// The predicted answer string.
    pub fn predict(&self, x: &SparseVector) -> &str {
        &self.classes[self.predict_index(x)]
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> LogisticRegression {
        // class "a" likes feature 0, class "b" likes feature 1
        LogisticRegression::from_parts(
            vec!["a".into(), "b".into()],
            2,
            vec![1.0, -1.0, -1.0, 1.0],
            vec![0.0, 0.1],
        )
    }

    #[test]
    fn test_predicts_highest_score() {
        let m = two_class();
        let x = SparseVector { indices: vec![0], values: vec![1.0] };
        assert_eq!(m.predict(&x), "a");
        let y = SparseVector { indices: vec![1], values: vec![1.0] };
        assert_eq!(m.predict(&y), "b");
    }

    #[test]
    fn test_zero_vector_uses_intercepts() {
        let m = two_class();
        assert_eq!(m.decision_function(&SparseVector::default()), vec![0.0, 0.1]);
        assert_eq!(m.predict(&SparseVector::default()), "b");
    }

    #[test]
    fn test_ties_go_to_first_class() {
        let m = LogisticRegression::from_parts(
            vec!["first".into(), "second".into()],
            1,
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        );
        assert_eq!(m.predict(&SparseVector::default()), "first");
    }

    #[test]
    fn test_constant_classifier() {
        let m = LogisticRegression::constant("only", 3);
        let x = SparseVector { indices: vec![2], values: vec![1.0] };
        assert_eq!(m.predict(&x), "only");
    }

    #[test]
    fn test_out_of_range_columns_are_ignored() {
        let m = two_class();
        let x = SparseVector { indices: vec![0, 7], values: vec![1.0, 100.0] };
        assert_eq!(m.predict(&x), "a");
    }

    #[test]
    #[should_panic(expected = "coef shape mismatch")]
    fn test_shape_mismatch_panics() {
        LogisticRegression::from_parts(vec!["a".into()], 2, vec![1.0], vec![0.0]);
    }
}
