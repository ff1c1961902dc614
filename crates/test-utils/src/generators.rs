//! Test data generators.
//!
//! Every generator is deterministic: the same arguments always give the
//! same data, so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when a test doesn't care which sequence it gets.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Creates `0, step, 2*step, ...` with `len` entries.
///
/// # Example
///
/// ```
/// use test_utils::create_ramp;
///
/// assert_eq!(create_ramp(4, 3), vec![0, 3, 6, 9]);
/// ```
pub fn create_ramp(len: usize, step: i64) -> Vec<i64> {
    (0..len as i64).map(|i| i * step).collect()
}

/// Creates `len` pseudo-random i32 values in `[low, high)`.
pub fn create_pseudo_random_i32(len: usize, low: i32, high: i32, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}

/// Creates `len` pseudo-random f64 values in `[low, high)`.
pub fn create_pseudo_random_f64(len: usize, low: f64, high: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(low..high)).collect()
}

/// Creates `len` pseudo-random words covering the whole range of `T`,
/// including the extremes that act as sentinels.
pub fn create_pseudo_random_words<T>(len: usize, seed: u64) -> Vec<T>
where
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

/// Creates a keep/drop mask where every `period`-th entry is `false`.
///
/// A period of 0 keeps everything.
pub fn create_missing_pattern(len: usize, period: usize) -> Vec<bool> {
    (0..len)
        .map(|i| period == 0 || i % period != period - 1)
        .collect()
}

/// Creates a random keep/drop mask with roughly `density` of entries kept.
pub fn create_random_mask(len: usize, density: f64, seed: u64) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_bool(density.clamp(0.0, 1.0))).collect()
}

/// Creates short lowercase words, some repeated and some empty.
pub fn create_words(len: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let n = rng.gen_range(0..4);
            (0..n).map(|_| rng.gen_range(b'a'..=b'c') as char).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp() {
        assert_eq!(create_ramp(0, 5), Vec::<i64>::new());
        assert_eq!(create_ramp(3, -2), vec![0, -2, -4]);
    }

    #[test]
    fn test_random_is_deterministic() {
        let a = create_pseudo_random_i32(100, -10, 10, DEFAULT_SEED);
        let b = create_pseudo_random_i32(100, -10, 10, DEFAULT_SEED);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-10..10).contains(v)));
    }

    #[test]
    fn test_missing_pattern() {
        assert_eq!(
            create_missing_pattern(6, 3),
            vec![true, true, false, true, true, false]
        );
        assert!(create_missing_pattern(4, 0).iter().all(|keep| *keep));
    }

    #[test]
    fn test_words_are_short() {
        let words = create_words(50, 7);
        assert_eq!(words.len(), 50);
        assert!(words.iter().all(|w| w.len() < 4));
    }
}
