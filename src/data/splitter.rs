// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a SEEDED generator and splits them into
// a training set and a held-out test set.
//
//   - Same input + same seed  →  same split, on every run
//   - test size = ceil(total * test_fraction), but the training
//     set always keeps at least one sample, so a one-record
//     dataset trains on that record and evaluates on nothing
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom over a
// StdRng seeded from a u64.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` deterministically and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out for testing, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; fixes the permutation
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total  = samples.len();
    let n_test = test_size(total, test_fraction);

    // split_off(n) keeps [0..n) in `samples` and returns [n..total)
    let test = samples.split_off(total - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}

/// Number of held-out samples for a dataset of `total` items.
pub fn test_size(total: usize, test_fraction: f64) -> usize {
    if total == 0 {
        return 0;
    }
    let fraction = test_fraction.clamp(0.0, 1.0);
    let wanted   = ((total as f64) * fraction).ceil() as usize;
    wanted.min(total - 1)
}
