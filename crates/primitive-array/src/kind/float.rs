//! IEEE floating-point kinds. NaN is the only missing value.

use std::cmp::Ordering;

use array_common::{ArrayResult, ElementKind};
use bytes::{Buf, BufMut};

use super::{ensure_remaining, parse_float_text, round_half_up, Kind};
use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;

/// Java-compatible display text for floats: `NaN`, `Infinity`, `-Infinity`,
/// otherwise the shortest round-trip representation.
macro_rules! float_text {
    ($value:expr) => {{
        let value = $value;
        if value.is_nan() {
            "NaN".to_string()
        } else if value.is_infinite() {
            if value > 0.0 {
                "Infinity".to_string()
            } else {
                "-Infinity".to_string()
            }
        } else {
            // Shortest round-trip form, so `1e-7` rather than `1.0E-7`.
            // Both spellings parse back to the same value.
            format!("{:?}", value)
        }
    }};
}

pub(crate) fn double_text(value: f64) -> String {
    float_text!(value)
}

macro_rules! float_kind {
    (
        $(#[$meta:meta])* $name:ident, $word:ty, $bits:ty, $variant:ident,
        narrow = $narrow:expr, hash = $hash:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Kind for $name {
            type Word = $word;
            type Value = $word;
            /// Bit pattern with every NaN collapsed to one key.
            type Key = $bits;

            const KIND: ElementKind = ElementKind::$variant;
            const MISSING_FIXED: bool = true;
            const WIDTH: usize = std::mem::size_of::<$word>();

            fn sentinel() -> $word {
                <$word>::NAN
            }

            fn pack(value: $word) -> $word {
                value
            }

            fn unpack(word: &$word) -> $word {
                *word
            }

            fn is_sentinel(word: &$word) -> bool {
                word.is_nan()
            }

            fn key(word: &$word) -> $bits {
                if word.is_nan() {
                    <$word>::NAN.to_bits()
                } else {
                    word.to_bits()
                }
            }

            /// NaN sorts last, and -0.0 sorts before 0.0.
            fn compare(a: &$word, b: &$word) -> Ordering {
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.total_cmp(b),
                }
            }

            fn hash_term(word: &$word) -> i32 {
                let hash: fn($bits) -> i32 = $hash;
                hash(Self::key(word))
            }

            fn min_word() -> $word {
                -<$word>::MAX
            }

            fn max_word() -> $word {
                <$word>::MAX
            }

            fn from_i128(value: i128) -> Option<$word> {
                Some(value as $word)
            }

            fn from_f64(value: f64) -> Option<$word> {
                let narrow: fn(f64) -> Option<$word> = $narrow;
                if value.is_nan() {
                    None
                } else {
                    narrow(value)
                }
            }

            fn from_text(text: &str) -> Option<$word> {
                Self::from_f64(parse_float_text(text))
            }

            fn to_i128(word: &$word) -> Option<i128> {
                round_half_up(*word as f64)
            }

            fn to_f64(word: &$word) -> f64 {
                *word as f64
            }

            fn to_text(word: &$word) -> String {
                float_text!(*word)
            }

            fn value_text(word: &$word) -> String {
                if word.is_finite() {
                    Self::to_text(word)
                } else {
                    String::new()
                }
            }

            fn json_text(word: &$word) -> String {
                if word.is_finite() {
                    Self::to_text(word)
                } else {
                    "null".to_string()
                }
            }

            fn swap_bytes(word: &$word) -> $word {
                <$word>::from_bits(word.to_bits().swap_bytes())
            }

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
                buf.put_slice(&word.to_be_bytes());
            }

            fn get_dap<B: Buf>(buf: &mut B) -> ArrayResult<$word> {
                Self::get_word(buf)
            }

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

float_kind!(
    /// 32-bit IEEE floats.
    FloatKind, f32, u32, Float,
    narrow = |value| {
        if value.is_finite() && value.abs() > f32::MAX as f64 {
            None
        } else {
            Some(value as f32)
        }
    },
    hash = |bits| bits as i32
);

float_kind!(
    /// 64-bit IEEE floats.
    DoubleKind, f64, u64, Double,
    narrow = Some,
    hash = |bits| (bits ^ (bits >> 32)) as i32
);
