// ============================================================
// Layer 6 — Classification Report
// ============================================================
// Evaluates predictions on the held-out test set.
//
// Per class (one row per label seen in y_true OR y_pred):
//   precision = tp / (tp + fp)
//   recall    = tp / (tp + fn)
//   f1        = 2·p·r / (p + r)
//   support   = number of true samples of that class
// A ratio with a zero denominator is reported as 0.
//
// Summary rows:
//   accuracy     — fraction of exact matches
//   macro avg    — unweighted mean over classes
//   weighted avg — mean weighted by support
//
// The report is diagnostic only: training saves the model no
// matter how poor these numbers are.

use std::collections::BTreeMap;
use std::fmt;

/// Longest label printed before it is shortened with "...".
const MAX_LABEL_WIDTH: usize = 60;

/// Metrics for one class label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub label:     String,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

/// Averages across classes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes:      Vec<ClassMetrics>,
    pub accuracy:     f64,
    pub macro_avg:    AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total:        usize,
}

#[derive(Default)]
struct Counts {
    tp:      usize,
    fp:      usize,
    support: usize,
}

impl ClassificationReport {
    /// Build a report from paired true and predicted labels.
    ///
    /// # Panics
    /// Panics if the slices differ in length.
    pub fn from_predictions<T, P>(y_true: &[T], y_pred: &[P]) -> Self
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        assert_eq!(y_true.len(), y_pred.len(), "y_true and y_pred differ in length");

        let mut counts: BTreeMap<&str, Counts> = BTreeMap::new();
        let mut correct = 0usize;

        for (t, p) in y_true.iter().zip(y_pred) {
            let (t, p) = (t.as_ref(), p.as_ref());
            counts.entry(t).or_default().support += 1;
            if t == p {
                correct += 1;
                counts.entry(t).or_default().tp += 1;
            } else {
                counts.entry(p).or_default().fp += 1;
            }
        }

        let classes: Vec<ClassMetrics> = counts
            .into_iter()
            .map(|(label, c)| {
                let precision = ratio(c.tp, c.tp + c.fp);
                let recall    = ratio(c.tp, c.support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics { label: label.to_string(), precision, recall, f1, support: c.support }
            })
            .collect();

        let total = y_true.len();
        let n     = classes.len() as f64;

        let mut macro_avg    = AverageMetrics::default();
        let mut weighted_avg = AverageMetrics::default();
        if !classes.is_empty() {
            for c in &classes {
                macro_avg.precision += c.precision / n;
                macro_avg.recall    += c.recall / n;
                macro_avg.f1        += c.f1 / n;

                let w = ratio(c.support, total);
                weighted_avg.precision += c.precision * w;
                weighted_avg.recall    += c.recall * w;
                weighted_avg.f1        += c.f1 * w;
            }
        }

        Self {
            classes,
            accuracy: ratio(correct, total),
            macro_avg,
            weighted_avg,
            total,
        }
    }

    pub fn class(&self, label: &str) -> Option<&ClassMetrics> {
        self.classes.iter().find(|c| c.label == label)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn shorten(label: &str) -> String {
    let single_line = label.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_LABEL_WIDTH {
        single_line
    } else {
        let head: String = single_line.chars().take(MAX_LABEL_WIDTH - 3).collect();
        format!("{head}...")
    }
}

/// Plain-text table, one row per class plus the summary rows.
impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.classes.iter().map(|c| shorten(&c.label)).collect();
        let width = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:>width$} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for (label, c) in labels.iter().zip(&self.classes) {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, c.precision, c.recall, c.f1, c.support,
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>width$} {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, self.total)?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total,
            )?;
        }
        Ok(())
    }
}
