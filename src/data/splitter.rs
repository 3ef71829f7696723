// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Shuffles samples with a FIXED seed and splits them into a
// training partition and a held-out test partition. The fixed
// seed makes repeated training runs over the same data partition
// identically, so results are reproducible.
//
// Uses Fisher-Yates via rand::seq::SliceRandom over a seeded
// StdRng.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Deterministically shuffle `samples` and split into (train, test).
///
/// `train_fraction` is the proportion kept for training, e.g. 0.8.
/// The same seed over the same input always yields the same partition.
pub fn split_train_test<T>(
    mut samples:    Vec<T>,
    train_fraction: f64,
    seed:           u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes elements [n..] and returns them
    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} train, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.8, 42);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (mut train, test) = split_train_test(items, 0.7, 42);
        train.extend(test);
        train.sort_unstable();
        assert_eq!(train, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.8, 42);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = split_train_test((0..200).collect::<Vec<_>>(), 0.8, 42);
        let b = split_train_test((0..200).collect::<Vec<_>>(), 0.8, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_sample_lands_in_training() {
        let (train, test) = split_train_test(vec![1usize], 0.8, 42);
        assert_eq!(train.len(), 1);
        assert!(test.is_empty());
    }
}
