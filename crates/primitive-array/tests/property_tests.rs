//! Randomized checks of the array laws, with fixed seeds so failures
//! reproduce.

use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use primitive_array::kind::{
    ByteKind, CharKind, DoubleKind, IntKind, LongKind, ShortKind, StringKind, UByteKind,
    UIntKind, ULongKind, UShortKind,
};
use primitive_array::{
    ByteArray, DoubleArray, IntArray, Kind, LongArray, StringArray, UByteArray, UIntArray,
    ULongArray, UShortArray,
};
use test_utils::{
    create_missing_pattern, create_pseudo_random_f64, create_pseudo_random_i32,
    create_pseudo_random_words, create_ramp, create_random_mask, create_words, DEFAULT_SEED,
};

const ROUNDS: u64 = 20;

/// Large enough to take the parallel sort path at the default threshold.
const PARALLEL_LEN: usize = 20_000;

/// Sorts `words` both ways and returns (parallel, sequential).
fn sort_both_ways<K: Kind>(words: &[K::Word]) -> (Vec<K::Word>, Vec<K::Word>) {
    let mut parallel = words.to_vec();
    K::sort_words(&mut parallel, true);
    let mut sequential = words.to_vec();
    K::sort_words(&mut sequential, false);
    (parallel, sequential)
}

fn assert_pack_round_trip<K: Kind>(seed: u64)
where
    Standard: Distribution<K::Value>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..500 {
        let value: K::Value = rng.gen();
        assert_eq!(
            K::unpack(&K::pack(value.clone())),
            value,
            "{} seed {}",
            K::KIND,
            seed
        );
    }
}

// =============================================================================
// Unsigned Sort
// =============================================================================

#[test]
fn test_ubyte_sort_matches_logical_sort() {
    for seed in 0..ROUNDS {
        let words: Vec<i8> = create_pseudo_random_words(200, seed);
        let mut array = UByteArray::from_words(words.clone()).unwrap();
        array.sort();

        let mut expected: Vec<u8> = words.iter().map(|w| *w as u8).collect();
        expected.sort();
        let actual: Vec<u8> = (0..array.len()).map(|i| array.get(i).unwrap()).collect();
        assert_eq!(actual, expected, "seed {}", seed);
    }
}

#[test]
fn test_ushort_sort_matches_logical_sort() {
    for seed in 0..ROUNDS {
        let words: Vec<i16> = create_pseudo_random_words(300, seed);
        let mut array = UShortArray::from_words(words.clone()).unwrap();
        array.sort();

        let mut expected: Vec<u16> = words.iter().map(|w| *w as u16).collect();
        expected.sort();
        let actual: Vec<u16> = (0..array.len()).map(|i| array.get(i).unwrap()).collect();
        assert_eq!(actual, expected, "seed {}", seed);
    }
}

#[test]
fn test_uint_and_ulong_sort_match_logical_sort() {
    for seed in 0..ROUNDS {
        let words: Vec<i32> = create_pseudo_random_words(100, seed);
        let mut array = UIntArray::from_words(words.clone()).unwrap();
        array.sort();
        let mut expected: Vec<u32> = words.iter().map(|w| *w as u32).collect();
        expected.sort();
        let actual: Vec<u32> = (0..array.len()).map(|i| array.get(i).unwrap()).collect();
        assert_eq!(actual, expected, "uint seed {}", seed);

        let words: Vec<i64> = create_pseudo_random_words(100, seed);
        let mut array = ULongArray::from_words(words.clone()).unwrap();
        array.sort();
        let mut expected: Vec<u64> = words.iter().map(|w| *w as u64).collect();
        expected.sort();
        let actual: Vec<u64> = (0..array.len()).map(|i| array.get(i).unwrap()).collect();
        assert_eq!(actual, expected, "ulong seed {}", seed);
    }
}

#[test]
fn test_sort_results_are_ascending_and_idempotent() {
    for seed in 0..ROUNDS {
        let mut doubles =
            DoubleArray::from_values(create_pseudo_random_f64(150, -1e6, 1e6, seed)).unwrap();
        // Only the last slot may hold a missing value.
        doubles.add_f64(f64::NAN).unwrap();
        doubles.sort();
        assert!(doubles.is_ascending().is_ok(), "seed {}", seed);
        let once = doubles.clone();
        doubles.sort();
        assert_eq!(doubles, once);

        let words = create_words(80, seed).into_iter().filter(|w| !w.is_empty());
        let mut strings = StringArray::from_values(words).unwrap();
        strings.sort();
        assert!(strings.is_ascending().is_ok(), "seed {}", seed);
    }
}

// =============================================================================
// Size and Capacity
// =============================================================================

#[test]
fn test_size_never_exceeds_capacity() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let mut array = LongArray::new();
    for _ in 0..2_000 {
        match rng.gen_range(0..6) {
            0 => array.add(rng.gen()).unwrap(),
            1 => array.add_n(rng.gen_range(0..20), rng.gen()).unwrap(),
            2 if !array.is_empty() => {
                array.remove(rng.gen_range(0..array.len())).unwrap();
            }
            3 => {
                let at = rng.gen_range(0..=array.len());
                array.insert(at, rng.gen()).unwrap();
            }
            4 if array.len() > 2 => {
                let from = rng.gen_range(0..array.len());
                let to = rng.gen_range(from..=array.len());
                array.remove_range(from, to).unwrap();
            }
            5 => array.trim_to_size(),
            _ => {}
        }
        assert!(array.len() <= array.capacity());
        assert_eq!(array.to_vec().len(), array.len());
    }
}

#[test]
fn test_moves_permute_and_sort_restores() {
    let ramp = create_ramp(64, 3);
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED + 2);
    let mut array = LongArray::from_values(ramp.clone()).unwrap();
    for _ in 0..200 {
        let first = rng.gen_range(0..array.len());
        let last = rng.gen_range(first..=array.len());
        let destination = if rng.gen_bool(0.5) {
            rng.gen_range(0..=first)
        } else {
            rng.gen_range(last..=array.len())
        };
        array.move_range(first, last, destination).unwrap();
        assert_eq!(array.len(), ramp.len());
    }
    array.sort();
    assert_eq!(array.to_vec(), ramp);
}

// =============================================================================
// Missing Flag
// =============================================================================

#[test]
fn test_flag_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED + 1);
    let mut array = ByteArray::new();
    let mut raised = false;
    for _ in 0..500 {
        let value: i64 = rng.gen_range(-200..200);
        array.add_i64(value).unwrap();
        if !(-128..=127).contains(&value) {
            raised = true;
        }
        assert_eq!(array.max_is_missing(), raised, "after adding {}", value);

        if rng.gen_bool(0.1) {
            array.clear();
            array.sort();
            array.trim_to_size();
            assert_eq!(array.max_is_missing(), raised);
        }
    }
    assert!(raised);
}

// =============================================================================
// Ranking and Compaction
// =============================================================================

#[test]
fn test_ranking_law() {
    for seed in 0..ROUNDS {
        let array = IntArray::from_values(create_pseudo_random_i32(120, -10, 10, seed)).unwrap();
        let mut ranks = Vec::new();
        let distinct = array.make_indices(&mut ranks);

        assert_eq!(ranks.len(), array.len());
        assert!(distinct.first_tie().is_none());
        assert!(distinct.is_ascending().is_ok());
        for (i, rank) in ranks.iter().enumerate() {
            assert_eq!(distinct.get(*rank).unwrap(), array.get(i).unwrap());
        }

        // The distinct array ranks to the identity.
        let mut identity = Vec::new();
        distinct.make_indices(&mut identity);
        assert_eq!(identity, (0..distinct.len()).collect::<Vec<_>>());
    }
}

#[test]
fn test_compaction_law() {
    for seed in 0..ROUNDS {
        let values = create_pseudo_random_i32(100, i32::MIN, i32::MAX, seed);
        let mask = create_random_mask(110, 0.4, seed);
        let mut array = IntArray::from_values(values.clone()).unwrap();
        array.just_keep(&mask);

        let expected: Vec<i32> = values
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(v, _)| *v)
            .collect();
        assert_eq!(array.len(), mask[..100].iter().filter(|keep| **keep).count());
        assert_eq!(array.to_vec(), expected);
    }
}

#[test]
fn test_compaction_with_short_mask() {
    let mut array = IntArray::from_values(0..10).unwrap();
    array.just_keep(&create_missing_pattern(6, 3));
    assert_eq!(array.to_vec(), vec![0, 1, 3, 4]);
}

// =============================================================================
// Parallel Sort
// =============================================================================

#[test]
fn test_parallel_double_sort_is_bit_identical() {
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let words: Vec<f64> = (0..PARALLEL_LEN)
        .map(|i| match i % 97 {
            0 => f64::NAN,
            1 => 0.0,
            2 => -0.0,
            _ => rng.gen_range(-1e6..1e6),
        })
        .collect();

    let (parallel, sequential) = sort_both_ways::<DoubleKind>(&words);
    let bits = |v: &[f64]| v.iter().map(|d| d.to_bits()).collect::<Vec<u64>>();
    assert_eq!(bits(&parallel), bits(&sequential));

    let mut array = DoubleArray::from_words(words).unwrap();
    array.sort();
    assert_eq!(bits(&array.to_vec()), bits(&sequential));
    assert!(array.get(PARALLEL_LEN - 1).unwrap().is_nan());
}

#[test]
fn test_parallel_ushort_sort_matches_sequential() {
    for seed in 0..3 {
        let words: Vec<i16> = create_pseudo_random_words(PARALLEL_LEN, seed);
        let (parallel, sequential) = sort_both_ways::<UShortKind>(&words);
        assert_eq!(parallel, sequential, "seed {}", seed);

        let mut array = UShortArray::from_words(words).unwrap();
        array.sort();
        assert_eq!(array.to_vec(), sequential, "seed {}", seed);
        assert!(array.is_ascending().is_ok());
    }
}

#[test]
fn test_parallel_string_sort_matches_sequential() {
    let words = create_words(PARALLEL_LEN, DEFAULT_SEED);
    let (parallel, sequential) = sort_both_ways::<StringKind>(&words);
    assert_eq!(parallel, sequential);

    let mut array = StringArray::from_words(words).unwrap();
    array.sort();
    assert_eq!(array.to_vec(), sequential);
    assert_eq!(array.get(PARALLEL_LEN - 1).unwrap(), "");
}

// =============================================================================
// Packing
// =============================================================================

#[test]
fn test_pack_unpack_round_trip() {
    for seed in 0..ROUNDS {
        assert_pack_round_trip::<ByteKind>(seed);
        assert_pack_round_trip::<UByteKind>(seed);
        assert_pack_round_trip::<ShortKind>(seed);
        assert_pack_round_trip::<UShortKind>(seed);
        assert_pack_round_trip::<IntKind>(seed);
        assert_pack_round_trip::<UIntKind>(seed);
        assert_pack_round_trip::<LongKind>(seed);
        assert_pack_round_trip::<ULongKind>(seed);
        assert_pack_round_trip::<CharKind>(seed);
    }
}

// =============================================================================
// Codec Round Trips
// =============================================================================

#[test]
fn test_stream_and_dap_round_trip_random_doubles() {
    for seed in 0..ROUNDS {
        let source =
            DoubleArray::from_values(create_pseudo_random_f64(64, -1e9, 1e9, seed)).unwrap();

        let stream = source.to_stream_bytes().unwrap();
        let mut from_stream = DoubleArray::new();
        from_stream.read_from(&mut stream.clone(), source.len()).unwrap();
        assert_eq!(from_stream, source);

        let dap = source.to_dap_bytes().unwrap();
        let mut from_dap = DoubleArray::new();
        from_dap.internalize_dap(&mut dap.clone()).unwrap();
        assert_eq!(from_dap, source);
    }
}
