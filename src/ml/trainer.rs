// ============================================================
// Layer 5 — Classifier Training Loop
// ============================================================
// Fits a multinomial logistic regression with burn:
//
//   - Full batch: the whole training set is one [n, features]
//     tensor, so every iteration sees the same data in the same
//     order and the fit is reproducible
//   - Loss = mean cross-entropy + ||W||² / (2·C·n)
//   - Adam optimiser, at most `max_iter` steps, stops early once
//     the loss changes by less than `tol`
//   - Weights start at zero
//
// Backend: Autodiff<NdArray> on the CPU. The fitted weights are
// copied out into a plain LogisticRegression afterwards.
//
// Labels are the sorted distinct answers of the TRAINING set;
// answers that only occur in the test set can never be predicted.

use anyhow::{anyhow, bail, Result};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use std::collections::HashMap;

use crate::data::dataset::LabeledDataset;
use crate::ml::model::{LogisticRegression, SoftmaxRegression, SoftmaxRegressionConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

const LOG_EVERY: usize = 50;

// ─── Classifier Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Maximum optimiser steps
    pub max_iter:      usize,
    /// Adam step size
    pub learning_rate: f64,
    /// Inverse regularisation strength; smaller C means a stronger L2 penalty
    pub c:             f64,
    /// Stop once |loss(t-1) - loss(t)| < tol
    pub tol:           f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_iter:      500,
            learning_rate: 0.1,
            c:             1.0,
            tol:           1e-4,
        }
    }
}

/// Fit a classifier mapping feature vectors to answer strings.
pub fn fit_classifier(
    train:        &LabeledDataset,
    num_features: usize,
    cfg:          &ClassifierConfig,
) -> Result<LogisticRegression> {
    if train.is_empty() {
        bail!("cannot fit a classifier on an empty training set");
    }
    if num_features == 0 {
        bail!("cannot fit a classifier with zero features");
    }
    if cfg.c <= 0.0 {
        bail!("C must be positive, got {}", cfg.c);
    }

    let classes = train.classes();
    if let [only] = classes.as_slice() {
        tracing::warn!("Training set has a single class; the classifier will always return it");
        return Ok(LogisticRegression::constant(only.clone(), num_features));
    }

    let device = burn::backend::ndarray::NdArrayDevice::default();
    fit_softmax::<TrainBackend>(train, classes, num_features, cfg, &device)
}

fn fit_softmax<B: AutodiffBackend>(
    train:        &LabeledDataset,
    classes:      Vec<String>,
    num_features: usize,
    cfg:          &ClassifierConfig,
    device:       &B::Device,
) -> Result<LogisticRegression> {
    let n_samples   = train.len();
    let num_classes = classes.len();
    tracing::info!(
        "Fitting logistic regression: {} samples, {} features, {} classes",
        n_samples, num_features, num_classes,
    );

    // ── Dense feature matrix [n, features] ────────────────────────────────────
    let mut dense = vec![0.0f32; n_samples * num_features];
    for (row, example) in train.examples().iter().enumerate() {
        example
            .features
            .write_dense(&mut dense[row * num_features..(row + 1) * num_features]);
    }
    let features = Tensor::<B, 2>::from_data(TensorData::new(dense, [n_samples, num_features]), device);

    // ── Class index per sample ────────────────────────────────────────────────
    let class_index: HashMap<&str, usize> = classes
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.as_str(), idx))
        .collect();
    let targets: Vec<i32> = train
        .answers()
        .map(|a| class_index[a] as i32)
        .collect();
    let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), device);

    // ── Model + optimiser ─────────────────────────────────────────────────────
    let mut model: SoftmaxRegression<B> =
        SoftmaxRegressionConfig::new(num_features, num_classes).init(device);
    let mut optim = AdamConfig::new().init();

    let l2 = 1.0 / (cfg.c * n_samples as f64);

    // ── Optimisation loop ─────────────────────────────────────────────────────
    let mut previous_loss = f64::INFINITY;
    for iter in 1..=cfg.max_iter {
        let loss     = model.forward_loss(features.clone(), targets.clone(), l2);
        let loss_val = loss.clone().into_scalar().elem::<f64>();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.learning_rate, model, grads);

        if iter % LOG_EVERY == 0 {
            tracing::debug!("iter {:>4}/{} loss={:.6}", iter, cfg.max_iter, loss_val);
        }
        if (previous_loss - loss_val).abs() < cfg.tol {
            tracing::info!("Converged after {} iterations (loss={:.6})", iter, loss_val);
            break;
        }
        if iter == cfg.max_iter {
            tracing::warn!(
                "Reached max_iter={} before converging (loss={:.6})",
                cfg.max_iter, loss_val,
            );
        }
        previous_loss = loss_val;
    }

    export_parameters(&model.valid(), classes, num_features)
}

/// Copy burn parameters into a plain LogisticRegression.
/// burn stores the weight as [features, classes]; coef is [classes, features].
fn export_parameters<B: Backend>(
    model:        &SoftmaxRegression<B>,
    classes:      Vec<String>,
    num_features: usize,
) -> Result<LogisticRegression> {
    let num_classes = classes.len();

    let weight: Vec<f32> = model
        .linear
        .weight
        .val()
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Cannot read fitted weights: {e:?}"))?;

    let intercept: Vec<f32> = match &model.linear.bias {
        Some(bias) => bias
            .val()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read fitted intercepts: {e:?}"))?,
        None => vec![0.0; num_classes],
    };

    let mut coef = vec![0.0f32; num_classes * num_features];
    for feature in 0..num_features {
        for class in 0..num_classes {
            coef[class * num_features + feature] = weight[feature * num_classes + class];
        }
    }

    Ok(LogisticRegression::from_parts(classes, num_features, coef, intercept))
}
