//! Kind promotion and cross-kind copies.
//!
//! Values cross kinds through one of three currencies: i128 for integers and
//! chars, f64 whenever a float is involved, and text whenever a string is.
//! Values the target can't represent become the target's sentinel, which
//! also raises its missing flag.

use array_common::{ArrayError, ArrayResult, ElementKind};

use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;
use crate::kind::Kind;
use crate::pa_one::PaOne;

const BY: ElementKind = ElementKind::Byte;
const UB: ElementKind = ElementKind::UByte;
const SH: ElementKind = ElementKind::Short;
const US: ElementKind = ElementKind::UShort;
const IN: ElementKind = ElementKind::Int;
const UI: ElementKind = ElementKind::UInt;
const LO: ElementKind = ElementKind::Long;
const UL: ElementKind = ElementKind::ULong;
const FL: ElementKind = ElementKind::Float;
const DO: ElementKind = ElementKind::Double;
const CH: ElementKind = ElementKind::Char;
const ST: ElementKind = ElementKind::String;

/// Smallest kind able to hold values of both kinds, indexed by
/// [`ElementKind::index`].
#[rustfmt::skip]
const PROMOTION: [[ElementKind; 12]; 12] = [
    //        BY  UB  SH  US  IN  UI  LO  UL  FL  DO  CH  ST
    /* BY */ [BY, SH, SH, IN, IN, LO, LO, DO, FL, DO, ST, ST],
    /* UB */ [SH, UB, SH, US, IN, UI, LO, UL, FL, DO, ST, ST],
    /* SH */ [SH, SH, SH, IN, IN, LO, LO, DO, FL, DO, ST, ST],
    /* US */ [IN, US, IN, US, IN, UI, LO, UL, FL, DO, ST, ST],
    /* IN */ [IN, IN, IN, IN, IN, LO, LO, DO, DO, DO, ST, ST],
    /* UI */ [LO, UI, LO, UI, LO, UI, LO, UL, DO, DO, ST, ST],
    /* LO */ [LO, LO, LO, LO, LO, LO, LO, DO, DO, DO, ST, ST],
    /* UL */ [DO, UL, DO, UL, DO, UL, DO, UL, DO, DO, ST, ST],
    /* FL */ [FL, FL, FL, FL, DO, DO, DO, DO, FL, DO, ST, ST],
    /* DO */ [DO, DO, DO, DO, DO, DO, DO, DO, DO, DO, ST, ST],
    /* CH */ [ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, CH, ST],
    /* ST */ [ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST, ST],
];

/// The kind needed to hold values of both `a` and `b`.
pub fn needed_kind(a: ElementKind, b: ElementKind) -> ElementKind {
    PROMOTION[a.index()][b.index()]
}

/// How values travel from one kind to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPath {
    /// Same kind: storage words are copied.
    Identity,
    /// Through i128 (integers and chars).
    Integer,
    /// Through f64 (any float on either side).
    Float,
    /// Through text (a string on either side; a string becomes a char by its
    /// first character).
    Text,
}

pub const fn conversion_path(from: ElementKind, to: ElementKind) -> ConversionPath {
    match (from, to) {
        (a, b) if a as u8 == b as u8 => ConversionPath::Identity,
        (ElementKind::String, _) | (_, ElementKind::String) => ConversionPath::Text,
        (ElementKind::Float | ElementKind::Double, _)
        | (_, ElementKind::Float | ElementKind::Double) => ConversionPath::Float,
        _ => ConversionPath::Integer,
    }
}

impl<K: Kind> TypedArray<K> {
    /// Build an array of this kind from any array, converting every value.
    pub fn from_array(other: &PrimitiveArray) -> ArrayResult<Self> {
        let mut array = Self::with_capacity(other.len())?;
        array.append(other)?;
        Ok(array)
    }

    // === Missing-aware getters ===

    /// Element as f64; missing is NaN.
    pub fn get_f64(&self, index: usize) -> ArrayResult<f64> {
        let word = self.get_word(index)?;
        Ok(if self.word_is_missing(word) {
            f64::NAN
        } else {
            K::to_f64(word)
        })
    }

    /// Element as f64, ignoring the missing flag.
    pub fn get_raw_f64(&self, index: usize) -> ArrayResult<f64> {
        Ok(K::to_f64(self.get_word(index)?))
    }

    /// Element as an integer; `None` when missing or not a number.
    pub fn get_i128(&self, index: usize) -> ArrayResult<Option<i128>> {
        let word = self.get_word(index)?;
        Ok(if self.word_is_missing(word) {
            None
        } else {
            K::to_i128(word)
        })
    }

    pub fn get_raw_i128(&self, index: usize) -> ArrayResult<Option<i128>> {
        Ok(K::to_i128(self.get_word(index)?))
    }

    /// Element as i64; `None` when missing, not a number or out of range.
    pub fn get_i64(&self, index: usize) -> ArrayResult<Option<i64>> {
        Ok(self
            .get_i128(index)?
            .and_then(|value| i64::try_from(value).ok()))
    }

    /// Element as text; missing is `""`.
    pub fn get_string(&self, index: usize) -> ArrayResult<String> {
        let word = self.get_word(index)?;
        Ok(if self.word_is_missing(word) {
            String::new()
        } else {
            K::value_text(word)
        })
    }

    /// Element as text, rendering the sentinel as its stored value.
    pub fn get_raw_string(&self, index: usize) -> ArrayResult<String> {
        Ok(K::to_text(self.get_word(index)?))
    }

    /// Every element as f64, missing as NaN.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.iter_words()
            .map(|word| {
                if self.word_is_missing(word) {
                    f64::NAN
                } else {
                    K::to_f64(word)
                }
            })
            .collect()
    }

    /// Every element as text, missing as `""`.
    pub fn to_string_vec(&self) -> Vec<String> {
        self.iter_words()
            .map(|word| {
                if self.word_is_missing(word) {
                    String::new()
                } else {
                    K::value_text(word)
                }
            })
            .collect()
    }

    // === Converting setters ===

    /// Resolve a conversion result, storing the sentinel and raising the
    /// missing flag when the value has no representation.
    fn admit(&mut self, converted: Option<K::Word>) -> K::Word {
        match converted {
            Some(word) => word,
            None => {
                self.mark_max_is_missing();
                K::sentinel()
            }
        }
    }

    fn push_converted(&mut self, converted: Option<K::Word>) -> ArrayResult<()> {
        self.reserve_additional(1)?;
        let word = self.admit(converted);
        self.add_word(word)
    }

    fn push_n_converted(&mut self, n: usize, converted: Option<K::Word>) -> ArrayResult<()> {
        if n == 0 {
            return Ok(());
        }
        self.reserve_additional(n)?;
        let word = self.admit(converted);
        self.add_n_words(n, word)
    }

    fn set_converted(&mut self, index: usize, converted: Option<K::Word>) -> ArrayResult<()> {
        self.get_word(index)?;
        let word = self.admit(converted);
        self.set_word(index, word)
    }

    pub fn add_i64(&mut self, value: i64) -> ArrayResult<()> {
        self.push_converted(K::from_i128(value as i128))
    }

    pub fn add_u64(&mut self, value: u64) -> ArrayResult<()> {
        self.push_converted(K::from_i128(value as i128))
    }

    pub fn add_f64(&mut self, value: f64) -> ArrayResult<()> {
        self.push_converted(K::from_f64(value))
    }

    pub fn add_string(&mut self, text: &str) -> ArrayResult<()> {
        self.push_converted(K::from_text(text))
    }

    /// Append a UTF-16 code unit.
    pub fn add_char(&mut self, code: u16) -> ArrayResult<()> {
        self.push_converted(K::from_char_code(code))
    }

    pub fn add_pa_one(&mut self, value: &PaOne) -> ArrayResult<()> {
        self.push_converted(value.to_word::<K>())
    }

    pub fn add_n_i64(&mut self, n: usize, value: i64) -> ArrayResult<()> {
        self.push_n_converted(n, K::from_i128(value as i128))
    }

    pub fn add_n_f64(&mut self, n: usize, value: f64) -> ArrayResult<()> {
        self.push_n_converted(n, K::from_f64(value))
    }

    pub fn add_n_string(&mut self, n: usize, text: &str) -> ArrayResult<()> {
        self.push_n_converted(n, K::from_text(text))
    }

    pub fn add_n_pa_one(&mut self, n: usize, value: &PaOne) -> ArrayResult<()> {
        self.push_n_converted(n, value.to_word::<K>())
    }

    pub fn set_i64(&mut self, index: usize, value: i64) -> ArrayResult<()> {
        self.set_converted(index, K::from_i128(value as i128))
    }

    pub fn set_f64(&mut self, index: usize, value: f64) -> ArrayResult<()> {
        self.set_converted(index, K::from_f64(value))
    }

    pub fn set_string(&mut self, index: usize, text: &str) -> ArrayResult<()> {
        self.set_converted(index, K::from_text(text))
    }

    pub fn set_pa_one(&mut self, index: usize, value: &PaOne) -> ArrayResult<()> {
        self.set_converted(index, value.to_word::<K>())
    }

    pub fn insert_string(&mut self, index: usize, text: &str) -> ArrayResult<()> {
        if index > self.len() {
            return Err(ArrayError::InsertOutOfBounds {
                kind: K::KIND,
                index,
                size: self.len(),
            });
        }
        self.reserve_additional(1)?;
        let word = self.admit(K::from_text(text));
        self.insert_word(index, word)
    }

    // === Cross-kind copies ===

    /// Convert element `index` of `source` to this kind. `None` means the
    /// value is missing or not representable. `raw` reads the source's
    /// stored values, ignoring its missing flag.
    fn convert_element(
        source: &PrimitiveArray,
        index: usize,
        raw: bool,
    ) -> ArrayResult<Option<K::Word>> {
        Ok(match conversion_path(source.kind(), K::KIND) {
            ConversionPath::Identity => {
                let typed = K::downcast(source).ok_or(ArrayError::KindMismatch {
                    expected: K::KIND,
                    actual: source.kind(),
                })?;
                let word = typed.get_word(index)?;
                if !raw && typed.word_is_missing(word) {
                    None
                } else {
                    Some(word.clone())
                }
            }
            ConversionPath::Integer => {
                let value = if raw {
                    source.get_raw_i128(index)?
                } else {
                    source.get_i128(index)?
                };
                value.and_then(K::from_i128)
            }
            ConversionPath::Float => {
                let value = if raw {
                    source.get_raw_f64(index)?
                } else {
                    source.get_f64(index)?
                };
                K::from_f64(value)
            }
            ConversionPath::Text => {
                let text = if raw {
                    source.get_raw_string(index)?
                } else {
                    source.get_string(index)?
                };
                K::from_text(&text)
            }
        })
    }

    /// Convert `[start, start + count)` of `source` before anything is stored,
    /// so a failure leaves this array untouched.
    fn convert_range(
        source: &PrimitiveArray,
        start: usize,
        count: usize,
        raw: bool,
    ) -> ArrayResult<Vec<Option<K::Word>>> {
        let end = start
            .checked_add(count)
            .filter(|end| *end <= source.len())
            .ok_or_else(|| {
                ArrayError::invalid_argument(format!(
                    "range start {} count {} exceeds source size {}",
                    start,
                    count,
                    source.len()
                ))
            })?;
        (start..end)
            .map(|i| Self::convert_element(source, i, raw))
            .collect()
    }

    /// Append every value of `other`, converting to this kind. Missing and
    /// unrepresentable values become missing here.
    ///
    /// A same-kind source is copied word for word and passes on a raised
    /// missing flag.
    pub fn append(&mut self, other: &PrimitiveArray) -> ArrayResult<()> {
        if let Some(same) = K::downcast(other) {
            self.add_words(same.as_slice())?;
            if same.max_is_missing() {
                self.mark_max_is_missing();
            }
            return Ok(());
        }
        self.add_from(other, 0, other.len())
    }

    /// Append `count` values of `other` starting at `start`.
    pub fn add_from(&mut self, other: &PrimitiveArray, start: usize, count: usize) -> ArrayResult<()> {
        let converted = Self::convert_range(other, start, count, false)?;
        self.reserve_additional(converted.len())?;
        for value in converted {
            let word = self.admit(value);
            self.add_word(word)?;
        }
        Ok(())
    }

    /// Append every stored value of `other`, ignoring its missing flag.
    /// Values that don't fit still become the sentinel, but this array's
    /// missing flag is left alone.
    pub fn raw_append(&mut self, other: &PrimitiveArray) -> ArrayResult<()> {
        let converted = Self::convert_range(other, 0, other.len(), true)?;
        let words: Vec<K::Word> = converted
            .into_iter()
            .map(|value| value.unwrap_or_else(K::sentinel))
            .collect();
        self.add_words(&words)
    }

    /// Overwrite element `index` with element `other_index` of `other`.
    pub fn set_from(
        &mut self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<()> {
        self.get_word(index)?;
        let converted = Self::convert_element(other, other_index, false)?;
        self.set_converted(index, converted)
    }

    /// Replace every element equal to `from` with `to`, both given as text.
    /// Returns the number of elements replaced.
    pub fn switch_from_to(&mut self, from: &str, to: &str) -> usize {
        let from = K::from_text(from).unwrap_or_else(K::sentinel);
        let to_converted = K::from_text(to);
        let to_missing = to_converted.as_ref().map_or(true, K::is_sentinel);
        let to = to_converted.unwrap_or_else(K::sentinel);
        if K::compare(&from, &to).is_eq() {
            return 0;
        }

        let mut count = 0;
        for word in self.as_mut_slice() {
            if K::compare(word, &from).is_eq() {
                *word = to.clone();
                count += 1;
            }
        }
        if count > 0 && to_missing {
            self.mark_max_is_missing();
        }
        count
    }
}
