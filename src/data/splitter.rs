// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples with a caller-supplied generator and splits
// them into two sets:
//   - Training set:   fed to the downstream classifier
//   - Validation set: held back to measure generalisation
//
// Used when a dataset ships without a dev file: the validation
// set is carved out of the (already shuffled) training data.
//
// The generator is passed in rather than created here, so the
// normaliser's single seeded StdRng drives every permutation
// and repeated runs produce identical splits.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `samples` with `rng` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.8 = 80%
/// * `rng`            - Generator driving the shuffle
///
/// # Returns
/// A tuple (train_samples, val_samples)
pub fn split_train_val<T, R>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    rng:            &mut R,
) -> (Vec<T>, Vec<T>)
where
    R: Rng + ?Sized,
{
    samples.shuffle(rng);

    // e.g. 100 samples * 0.8 = 80 → first 80 are training
    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.8, &mut rng());
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, val)      = split_train_val(items, 0.7, &mut rng());
        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.8, &mut rng());
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 1.0, &mut rng());
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_val((0..40).collect::<Vec<u32>>(), 0.75, &mut rng());
        let b = split_train_val((0..40).collect::<Vec<u32>>(), 0.75, &mut rng());
        assert_eq!(a, b);
    }
}
