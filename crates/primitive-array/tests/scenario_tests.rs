//! Worked scenarios from the array contract, run against the public API.
//!
//! Inputs and expected outputs live in `test_utils::fixtures::scenario`.

use primitive_array::{CharArray, ElementKind, IntArray, PrimitiveArray, UShortArray};
use test_utils::{assert_slices_approx_eq, fixtures::scenario};

// =============================================================================
// Unsigned Storage Words
// =============================================================================

#[test]
fn test_ushort_raw_words_with_missing_flag() {
    let array = UShortArray::from_words(scenario::USHORT_WORDS.to_vec())
        .unwrap()
        .with_max_is_missing(true);

    assert_eq!(array.get(0).unwrap(), 1);
    assert!(!array.is_missing(0).unwrap());
    assert!(array.is_missing(1).unwrap());
    assert_eq!(array.get_string(1).unwrap(), "");
    assert_eq!(array.get_i64(1).unwrap(), None);

    // The word still unpacks to the kind maximum.
    assert_eq!(array.get(1).unwrap(), u16::MAX);
    assert_eq!(array.get_raw_i128(1).unwrap(), Some(65535));
    assert!(array.is_max_value(1).unwrap());
}

#[test]
fn test_ushort_sentinel_without_flag_is_a_value() {
    let array = UShortArray::from_words(scenario::USHORT_WORDS.to_vec()).unwrap();
    assert!(!array.is_missing(1).unwrap());
    assert_eq!(array.get_i64(1).unwrap(), Some(65535));
    assert_eq!(array.to_string(), "1, 65535");
}

// =============================================================================
// Char Sentinel
// =============================================================================

#[test]
fn test_char_sentinel_text_forms() {
    let mut array = CharArray::new();
    array.add(b'a' as u16).unwrap();
    array.insert(0, scenario::CHAR_SENTINEL).unwrap();

    assert!(array.is_missing(0).unwrap());
    assert_eq!(array.get_string(0).unwrap(), "");
    assert_eq!(array.get_json_string(0).unwrap(), "null");
    assert_eq!(array.get_raw_string(0).unwrap(), "\u{FFFF}");
    assert_eq!(array.get_raw_i128(0).unwrap(), Some(65535));

    // The delimited display shows the raw sentinel.
    assert_eq!(array.to_string(), "\\uffff, a");
}

// =============================================================================
// Range Moves
// =============================================================================

#[test]
fn test_move_range_to_front() {
    let mut array = IntArray::from_values(scenario::MOVE_INPUT).unwrap();
    array.move_range(1, 3, 0).unwrap();
    assert_eq!(array.to_vec(), scenario::MOVE_TO_FRONT.to_vec());
}

#[test]
fn test_move_range_to_back() {
    let mut array = IntArray::from_values(scenario::MOVE_INPUT).unwrap();
    array.move_range(1, 2, 4).unwrap();
    assert_eq!(array.to_vec(), scenario::MOVE_TO_BACK.to_vec());
}

#[test]
fn test_move_range_rejects_destination_inside_range() {
    let mut array = IntArray::from_values(scenario::MOVE_INPUT).unwrap();
    assert!(array.move_range(1, 4, 2).is_err());
    assert_eq!(array.to_vec(), scenario::MOVE_INPUT.to_vec());
}

// =============================================================================
// Ranking
// =============================================================================

#[test]
fn test_make_indices_ranks_distinct_values() {
    let array = IntArray::from_values(scenario::RANK_INPUT).unwrap();
    let mut ranks = Vec::new();
    let distinct = array.make_indices(&mut ranks);

    assert_eq!(ranks, scenario::RANK_EXPECTED.to_vec());
    assert_eq!(distinct.to_vec(), scenario::RANK_DISTINCT.to_vec());
}

#[test]
fn test_make_indices_through_dynamic_array() {
    let array = PrimitiveArray::from_csv(ElementKind::Double, "25, 1, 1, 10").unwrap();
    let mut ranks = Vec::new();
    let distinct = array.make_indices(&mut ranks);

    assert_eq!(ranks, scenario::RANK_EXPECTED.to_vec());
    assert_eq!(distinct.kind(), ElementKind::Double);
    assert_slices_approx_eq!(distinct.to_f64_vec(), [1.0, 10.0, 25.0], 1e-12);
}

// =============================================================================
// DAP Round Trip
// =============================================================================

#[test]
fn test_dap_char_round_trip() {
    let array = CharArray::from_values(scenario::DAP_CHARS).unwrap();
    let mut encoded = Vec::new();
    let written = array.externalize_dap(&mut encoded).unwrap();
    assert_eq!(written, scenario::DAP_CHARS_LEN);
    assert_eq!(encoded.len(), scenario::DAP_CHARS_LEN);

    let mut decoded = CharArray::new();
    let mut reader = encoded.as_slice();
    let read = decoded.internalize_dap(&mut reader).unwrap();
    assert_eq!(read, scenario::DAP_CHARS_LEN);
    assert!(reader.is_empty());

    assert_eq!(written + read, 2 * (4 + 4 + 4 * 3));
    assert_eq!(decoded.to_vec(), scenario::DAP_CHARS.to_vec());
    assert_eq!(decoded, array);
}
