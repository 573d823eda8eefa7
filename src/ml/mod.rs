// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All feature-space and classifier code. burn is only used
// inside model.rs and trainer.rs; the fitted classifier is a
// plain struct, so inference runs without a tensor backend.
//
//   vectorizer.rs — TF-IDF vocabulary + IDF weights
//   model.rs      — burn softmax-regression module and the
//                   fitted, serialisable LogisticRegression
//   trainer.rs    — full-batch Adam fit on Autodiff<NdArray>
//   inferencer.rs — normalise → vectorise → predict

/// TF-IDF vectorizer and sparse feature vectors
pub mod vectorizer;

/// Logistic regression model (burn module + fitted parameters)
pub mod model;

/// Training loop producing a fitted LogisticRegression
pub mod trainer;

/// Inference engine over a loaded artifact
pub mod inferencer;
