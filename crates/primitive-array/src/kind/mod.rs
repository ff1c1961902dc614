//! Sentinel and packing policy for each element kind.
//!
//! Every kind implements [`Kind`], which is everything the generic
//! [`TypedArray`] needs to know about its elements:
//!
//! - the storage word (unsigned kinds use the same-width *signed* word)
//! - `pack`/`unpack` between logical values and storage words
//! - the single missing-value sentinel
//! - ordering, hashing and conversion in and out of the common
//!   i128 / f64 / text currencies used for cross-kind copies
//! - per-word binary encodings for the stream and DAP codecs
//!
//! | Kind   | Word   | Sentinel word | Missing flag |
//! |--------|--------|---------------|--------------|
//! | Byte   | i8     | 127           | optional     |
//! | UByte  | i8     | -1 (255)      | optional     |
//! | Short  | i16    | 32767         | optional     |
//! | UShort | i16    | -1 (65535)    | optional     |
//! | Int    | i32    | i32::MAX      | optional     |
//! | UInt   | i32    | -1            | optional     |
//! | Long   | i64    | i64::MAX      | optional     |
//! | ULong  | i64    | -1            | optional     |
//! | Float  | f32    | NaN           | always       |
//! | Double | f64    | NaN           | always       |
//! | Char   | u16    | 0xFFFF        | always       |
//! | String | String | ""            | always       |

mod float;
mod integer;
mod text;

pub use float::{DoubleKind, FloatKind};
pub use integer::{
    ByteKind, IntKind, LongKind, ShortKind, UByteKind, UIntKind, ULongKind, UShortKind,
};
pub use text::{CharKind, StringKind};

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use array_common::{ArrayError, ArrayResult, ElementKind};
use bytes::{Buf, BufMut};
use num_traits::ToPrimitive;
use rayon::slice::ParallelSliceMut;

use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;

/// Per-kind storage, sentinel and conversion rules.
pub trait Kind: Sized + Send + Sync + 'static {
    /// Native storage word.
    type Word: Clone + Default + Debug + Send + Sync;
    /// Logical value handed to and returned from callers.
    type Value: Clone + Debug + PartialEq;
    /// Hashable form of a word, consistent with [`Kind::compare`] equality.
    type Key: Hash + Eq;

    const KIND: ElementKind;
    /// True when the sentinel always means missing (the flag can't be cleared).
    const MISSING_FIXED: bool;
    /// Bytes per word in the stream codec; 0 for variable width.
    const WIDTH: usize;

    fn sentinel() -> Self::Word;
    fn pack(value: Self::Value) -> Self::Word;
    fn unpack(word: &Self::Word) -> Self::Value;
    fn is_sentinel(word: &Self::Word) -> bool;
    fn key(word: &Self::Word) -> Self::Key;

    /// Total order on logical values; the sentinel sorts last.
    fn compare(a: &Self::Word, b: &Self::Word) -> Ordering;

    /// Sort words ascending by [`Kind::compare`].
    ///
    /// Both strategies use a stable sort with the same comparator, so the
    /// result doesn't depend on which one runs.
    fn sort_words(words: &mut [Self::Word], parallel: bool) {
        if parallel {
            words.par_sort_by(Self::compare);
        } else {
            words.sort_by(Self::compare);
        }
    }

    /// Term contributed by one word to an array's hash code.
    fn hash_term(word: &Self::Word) -> i32;

    /// Smallest value the kind can hold.
    fn min_word() -> Self::Word;
    /// Largest value the kind can hold, not counting the sentinel.
    fn max_word() -> Self::Word;

    // === Conversion in (None = not representable, store the sentinel) ===

    fn from_i128(value: i128) -> Option<Self::Word>;
    fn from_f64(value: f64) -> Option<Self::Word>;
    fn from_text(text: &str) -> Option<Self::Word>;

    fn from_char_code(code: u16) -> Option<Self::Word> {
        Self::from_i128(code as i128)
    }

    // === Conversion out (raw: the missing flag is applied by the array) ===

    fn to_i128(word: &Self::Word) -> Option<i128>;
    fn to_f64(word: &Self::Word) -> f64;

    /// Display text of a word, sentinel included.
    fn to_text(word: &Self::Word) -> String;

    /// Text of a non-missing value for data exchange.
    fn value_text(word: &Self::Word) -> String {
        Self::to_text(word)
    }

    /// Text used by the delimited display, sentinel included.
    fn display_text(word: &Self::Word) -> String {
        Self::to_text(word)
    }

    /// JSON literal of a non-missing value.
    fn json_text(word: &Self::Word) -> String {
        Self::value_text(word)
    }

    /// NCCSV data-section text of a non-missing value.
    fn nccsv_data_text(word: &Self::Word) -> String {
        Self::value_text(word)
    }

    /// NCCSV attribute literal, sentinel included.
    fn nccsv_att_text(word: &Self::Word) -> String {
        format!("{}{}", Self::to_text(word), Self::KIND.nccsv_suffix())
    }

    fn swap_bytes(word: &Self::Word) -> Self::Word;

    /// Flip between signed and unsigned ordering of the stored bits.
    fn flip_sign(word: &Self::Word) -> Self::Word {
        word.clone()
    }

    // === Codecs ===

    /// Write one word in the stream encoding, returning the bytes written.
    fn put_word<B: BufMut>(word: &Self::Word, buf: &mut B) -> ArrayResult<usize>;
    fn get_word<B: Buf>(buf: &mut B) -> ArrayResult<Self::Word>;

    /// Write one word as a 4-byte-aligned DAP/XDR record.
    fn put_dap<B: BufMut>(word: &Self::Word, buf: &mut B);
    fn get_dap<B: Buf>(buf: &mut B) -> ArrayResult<Self::Word>;

    // === Dynamic dispatch ===

    fn downcast(array: &PrimitiveArray) -> Option<&TypedArray<Self>>;
    fn wrap(array: TypedArray<Self>) -> PrimitiveArray;
}

/// Evaluate `$body` with `$K` bound to the [`Kind`] implementation of a
/// runtime [`ElementKind`].
macro_rules! for_kind {
    ($kind:expr, $K:ident => $body:expr) => {
        match $kind {
            ::array_common::ElementKind::Byte => {
                type $K = $crate::kind::ByteKind;
                $body
            }
            ::array_common::ElementKind::UByte => {
                type $K = $crate::kind::UByteKind;
                $body
            }
            ::array_common::ElementKind::Short => {
                type $K = $crate::kind::ShortKind;
                $body
            }
            ::array_common::ElementKind::UShort => {
                type $K = $crate::kind::UShortKind;
                $body
            }
            ::array_common::ElementKind::Int => {
                type $K = $crate::kind::IntKind;
                $body
            }
            ::array_common::ElementKind::UInt => {
                type $K = $crate::kind::UIntKind;
                $body
            }
            ::array_common::ElementKind::Long => {
                type $K = $crate::kind::LongKind;
                $body
            }
            ::array_common::ElementKind::ULong => {
                type $K = $crate::kind::ULongKind;
                $body
            }
            ::array_common::ElementKind::Float => {
                type $K = $crate::kind::FloatKind;
                $body
            }
            ::array_common::ElementKind::Double => {
                type $K = $crate::kind::DoubleKind;
                $body
            }
            ::array_common::ElementKind::Char => {
                type $K = $crate::kind::CharKind;
                $body
            }
            ::array_common::ElementKind::String => {
                type $K = $crate::kind::StringKind;
                $body
            }
        }
    };
}
pub(crate) use for_kind;

/// Round half up, as data servers have always rounded floats to integers.
pub(crate) fn round_half_up(value: f64) -> Option<i128> {
    if !value.is_finite() {
        return None;
    }
    (value + 0.5).floor().to_i128()
}

/// Parse integer text: decimal, `0x` hex, or a float that gets rounded.
pub(crate) fn parse_integer_text(text: &str) -> Option<i128> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<i128>() {
        return Some(value);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return i128::from_str_radix(hex, 16)
            .ok()
            .map(|v| if negative { -v } else { v });
    }

    trimmed.parse::<f64>().ok().and_then(round_half_up)
}

/// Parse floating-point text. Empty or unparseable text is NaN.
pub(crate) fn parse_float_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Fold a 64-bit logical integer into a 32-bit hash term (high half XOR low half).
pub(crate) fn fold_hash(value: i128) -> i32 {
    let bits = value as u64;
    (bits ^ (bits >> 32)) as i32
}

pub(crate) fn ensure_remaining<B: Buf>(buf: &B, needed: usize, what: &str) -> ArrayResult<()> {
    if buf.remaining() < needed {
        return Err(ArrayError::invalid_data(format!(
            "unexpected end of data reading {}: need {} bytes, {} remaining",
            what,
            needed,
            buf.remaining()
        )));
    }
    Ok(())
}
