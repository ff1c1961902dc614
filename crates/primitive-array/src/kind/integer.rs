//! Signed and unsigned integer kinds.
//!
//! Unsigned kinds store each value in the signed word of the same width
//! (`u16` 40000 is stored as `i16` -25536). The logical maximum packs to -1,
//! which doubles as the missing-value sentinel.

use std::cmp::Ordering;

use array_common::{ArrayResult, ElementKind};
use bytes::{Buf, BufMut};
use rayon::slice::ParallelSliceMut;

use super::{ensure_remaining, fold_hash, parse_integer_text, round_half_up, Kind};
use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;

/// Shared by both macros: big-endian stream words, and DAP records where
/// words narrower than 4 bytes are sign-extended into an i32 slot.
macro_rules! integer_codec {
    ($word:ty) => {
        fn put_word<B: BufMut>(word: &$word, buf: &mut B) -> ArrayResult<usize> {
            buf.put_slice(&word.to_be_bytes());
            Ok(Self::WIDTH)
        }

        fn get_word<B: Buf>(buf: &mut B) -> ArrayResult<$word> {
            ensure_remaining(buf, Self::WIDTH, Self::KIND.name())?;
            let mut bytes = [0u8; std::mem::size_of::<$word>()];
            buf.copy_to_slice(&mut bytes);
            Ok(<$word>::from_be_bytes(bytes))
        }

        fn put_dap<B: BufMut>(word: &$word, buf: &mut B) {
            if Self::WIDTH < 4 {
                buf.put_i32(*word as i32);
            } else {
                buf.put_slice(&word.to_be_bytes());
            }
        }

        fn get_dap<B: Buf>(buf: &mut B) -> ArrayResult<$word> {
            if Self::WIDTH < 4 {
                ensure_remaining(buf, 4, Self::KIND.name())?;
                Ok(buf.get_i32() as $word)
            } else {
                Self::get_word(buf)
            }
        }
    };
}

macro_rules! signed_kind {
    ($(#[$meta:meta])* $name:ident, $word:ty, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Kind for $name {
            type Word = $word;
            type Value = $word;
            type Key = $word;

            const KIND: ElementKind = ElementKind::$variant;
            const MISSING_FIXED: bool = false;
            const WIDTH: usize = std::mem::size_of::<$word>();

            fn sentinel() -> $word {
                <$word>::MAX
            }

            fn pack(value: $word) -> $word {
                value
            }

            fn unpack(word: &$word) -> $word {
                *word
            }

            fn is_sentinel(word: &$word) -> bool {
                *word == <$word>::MAX
            }

            fn key(word: &$word) -> $word {
                *word
            }

            fn compare(a: &$word, b: &$word) -> Ordering {
                a.cmp(b)
            }

            fn sort_words(words: &mut [$word], parallel: bool) {
                if parallel {
                    words.par_sort_unstable();
                } else {
                    words.sort_unstable();
                }
            }

            /// The value itself; 64-bit values fold their halves together.
            fn hash_term(word: &$word) -> i32 {
                if Self::WIDTH <= 4 {
                    *word as i32
                } else {
                    fold_hash(*word as i128)
                }
            }

            fn min_word() -> $word {
                <$word>::MIN
            }

            fn max_word() -> $word {
                <$word>::MAX - 1
            }

            fn from_i128(value: i128) -> Option<$word> {
                <$word>::try_from(value).ok()
            }

            fn from_f64(value: f64) -> Option<$word> {
                round_half_up(value).and_then(Self::from_i128)
            }

            fn from_text(text: &str) -> Option<$word> {
                parse_integer_text(text).and_then(Self::from_i128)
            }

            fn to_i128(word: &$word) -> Option<i128> {
                Some(*word as i128)
            }

            fn to_f64(word: &$word) -> f64 {
                *word as f64
            }

            fn to_text(word: &$word) -> String {
                word.to_string()
            }

            fn swap_bytes(word: &$word) -> $word {
                word.swap_bytes()
            }

            fn flip_sign(word: &$word) -> $word {
                *word ^ <$word>::MIN
            }

            integer_codec!($word);

            fn downcast(array: &PrimitiveArray) -> Option<&TypedArray<Self>> {
                match array {
                    PrimitiveArray::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn wrap(array: TypedArray<Self>) -> PrimitiveArray {
                PrimitiveArray::$variant(array)
            }
        }
    };
}

macro_rules! unsigned_kind {
    ($(#[$meta:meta])* $name:ident, $word:ty, $value:ty, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Kind for $name {
            type Word = $word;
            type Value = $value;
            type Key = $word;

            const KIND: ElementKind = ElementKind::$variant;
            const MISSING_FIXED: bool = false;
            const WIDTH: usize = std::mem::size_of::<$word>();

            fn sentinel() -> $word {
                -1
            }

            fn pack(value: $value) -> $word {
                value as $word
            }

            fn unpack(word: &$word) -> $value {
                *word as $value
            }

            fn is_sentinel(word: &$word) -> bool {
                *word == -1
            }

            fn key(word: &$word) -> $word {
                *word
            }

            fn compare(a: &$word, b: &$word) -> Ordering {
                Self::unpack(a).cmp(&Self::unpack(b))
            }

            /// Sorting the signed words puts the upper half of the unsigned
            /// range (negative words) first. Rotating that block to the end
            /// gives logical order.
            fn sort_words(words: &mut [$word], parallel: bool) {
                if parallel {
                    words.par_sort_unstable();
                } else {
                    words.sort_unstable();
                }
                let upper_half = words.partition_point(|w| *w < 0);
                words.rotate_left(upper_half);
            }

            fn hash_term(word: &$word) -> i32 {
                let value = Self::unpack(word);
                if Self::WIDTH <= 4 {
                    value as i32
                } else {
                    fold_hash(value as i128)
                }
            }

            fn min_word() -> $word {
                0
            }

            fn max_word() -> $word {
                Self::pack(<$value>::MAX - 1)
            }

            fn from_i128(value: i128) -> Option<$word> {
                <$value>::try_from(value).ok().map(Self::pack)
            }

            fn from_f64(value: f64) -> Option<$word> {
                round_half_up(value).and_then(Self::from_i128)
            }

            fn from_text(text: &str) -> Option<$word> {
                parse_integer_text(text).and_then(Self::from_i128)
            }

            fn to_i128(word: &$word) -> Option<i128> {
                Some(Self::unpack(word) as i128)
            }

            fn to_f64(word: &$word) -> f64 {
                Self::unpack(word) as f64
            }

            fn to_text(word: &$word) -> String {
                Self::unpack(word).to_string()
            }

            fn swap_bytes(word: &$word) -> $word {
                word.swap_bytes()
            }

            fn flip_sign(word: &$word) -> $word {
                *word ^ <$word>::MIN
            }

            integer_codec!($word);

            fn downcast(array: &PrimitiveArray) -> Option<&TypedArray<Self>> {
                match array {
                    PrimitiveArray::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn wrap(array: TypedArray<Self>) -> PrimitiveArray {
                PrimitiveArray::$variant(array)
            }
        }
    };
}

signed_kind!(
    /// Signed 8-bit integers.
    ByteKind, i8, Byte
);
signed_kind!(
    /// Signed 16-bit integers.
    ShortKind, i16, Short
);
signed_kind!(
    /// Signed 32-bit integers.
    IntKind, i32, Int
);
signed_kind!(
    /// Signed 64-bit integers.
    LongKind, i64, Long
);

unsigned_kind!(
    /// Unsigned 8-bit integers packed into `i8`.
    UByteKind, i8, u8, UByte
);
unsigned_kind!(
    /// Unsigned 16-bit integers packed into `i16`.
    UShortKind, i16, u16, UShort
);
unsigned_kind!(
    /// Unsigned 32-bit integers packed into `i32`.
    UIntKind, i32, u32, UInt
);
unsigned_kind!(
    /// Unsigned 64-bit integers packed into `i64`.
    ULongKind, i64, u64, ULong
);
