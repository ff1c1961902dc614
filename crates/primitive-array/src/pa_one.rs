//! A single value tagged with its element kind.

use std::fmt;

use array_common::{ArrayResult, ElementKind};

use crate::buffer::TypedArray;
use crate::kind::{for_kind, Kind};

/// Payload of a [`PaOne`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Missing,
    /// Any integer kind; i128 holds every i64 and u64.
    Int(i128),
    Float(f64),
    /// A UTF-16 code unit.
    Char(u16),
    Text(String),
}

/// An immutable scalar whose value has already been converted to `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaOne {
    kind: ElementKind,
    value: Scalar,
}

impl PaOne {
    pub fn missing(kind: ElementKind) -> Self {
        Self {
            kind,
            value: Scalar::Missing,
        }
    }

    pub(crate) fn from_word<K: Kind>(word: &K::Word, missing: bool) -> Self {
        let value = if missing {
            Scalar::Missing
        } else if K::KIND == ElementKind::Char {
            K::to_i128(word)
                .and_then(|code| u16::try_from(code).ok())
                .map_or(Scalar::Missing, Scalar::Char)
        } else if K::KIND.is_integer() {
            K::to_i128(word).map_or(Scalar::Missing, Scalar::Int)
        } else if K::KIND.is_floating() {
            Scalar::Float(K::to_f64(word))
        } else {
            Scalar::Text(K::to_text(word))
        };
        Self {
            kind: K::KIND,
            value,
        }
    }

    fn from_converted<K: Kind>(converted: Option<K::Word>) -> Self {
        match converted {
            Some(word) => {
                let missing = K::MISSING_FIXED && K::is_sentinel(&word);
                Self::from_word::<K>(&word, missing)
            }
            None => Self::missing(K::KIND),
        }
    }

    pub fn from_i64(kind: ElementKind, value: i64) -> Self {
        for_kind!(kind, K => Self::from_converted::<K>(K::from_i128(value as i128)))
    }

    pub fn from_u64(kind: ElementKind, value: u64) -> Self {
        for_kind!(kind, K => Self::from_converted::<K>(K::from_i128(value as i128)))
    }

    pub fn from_f64(kind: ElementKind, value: f64) -> Self {
        for_kind!(kind, K => Self::from_converted::<K>(K::from_f64(value)))
    }

    pub fn from_char(kind: ElementKind, code: u16) -> Self {
        for_kind!(kind, K => Self::from_converted::<K>(K::from_char_code(code)))
    }

    pub fn from_text(kind: ElementKind, text: &str) -> Self {
        for_kind!(kind, K => Self::from_converted::<K>(K::from_text(text)))
    }

    /// Smallest value `kind` can hold.
    pub fn min_value(kind: ElementKind) -> Self {
        for_kind!(kind, K => Self::from_word::<K>(&K::min_word(), false))
    }

    /// Largest value `kind` can hold, excluding the sentinel (126 for
    /// bytes, 65534 for ushorts, U+FFFE for chars).
    pub fn max_value(kind: ElementKind) -> Self {
        for_kind!(kind, K => Self::from_word::<K>(&K::max_word(), false))
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    pub fn is_missing(&self) -> bool {
        self.value == Scalar::Missing
    }

    /// Convert to a storage word of kind `K`; `None` when missing or not
    /// representable.
    pub(crate) fn to_word<K: Kind>(&self) -> Option<K::Word> {
        match &self.value {
            Scalar::Missing => None,
            Scalar::Int(value) => K::from_i128(*value),
            Scalar::Float(value) => K::from_f64(*value),
            Scalar::Char(code) => K::from_char_code(*code),
            Scalar::Text(text) => K::from_text(text),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match &self.value {
            Scalar::Missing => f64::NAN,
            Scalar::Int(value) => *value as f64,
            Scalar::Float(value) => *value,
            Scalar::Char(code) => *code as f64,
            Scalar::Text(text) => crate::kind::parse_float_text(text),
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match &self.value {
            Scalar::Missing => None,
            Scalar::Int(value) => Some(*value),
            Scalar::Float(value) => crate::kind::round_half_up(*value),
            Scalar::Char(code) => Some(*code as i128),
            Scalar::Text(text) => crate::kind::parse_integer_text(text),
        }
    }

    /// Text in the style of the owning kind; missing is `""`.
    pub fn as_string(&self) -> String {
        for_kind!(self.kind, K => self
            .to_word::<K>()
            .map(|word| K::value_text(&word))
            .unwrap_or_default())
    }
}

impl fmt::Display for PaOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl<K: Kind> TypedArray<K> {
    pub fn get_pa_one(&self, index: usize) -> ArrayResult<PaOne> {
        let word = self.get_word(index)?;
        Ok(PaOne::from_word::<K>(word, self.word_is_missing(word)))
    }

    pub fn min_value(&self) -> PaOne {
        PaOne::min_value(K::KIND)
    }

    pub fn max_value(&self) -> PaOne {
        PaOne::max_value(K::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntArray, UShortArray};

    #[test]
    fn test_max_values_exclude_sentinel() {
        assert_eq!(PaOne::max_value(ElementKind::Byte).value(), &Scalar::Int(126));
        assert_eq!(PaOne::max_value(ElementKind::UShort).value(), &Scalar::Int(65534));
        assert_eq!(PaOne::max_value(ElementKind::Char).value(), &Scalar::Char(0xFFFE));
        assert_eq!(PaOne::min_value(ElementKind::UInt).value(), &Scalar::Int(0));
        assert_eq!(
            PaOne::max_value(ElementKind::ULong).value(),
            &Scalar::Int(u64::MAX as i128 - 1)
        );
    }

    #[test]
    fn test_constructors_convert_to_kind() {
        assert_eq!(PaOne::from_f64(ElementKind::Int, 2.5).value(), &Scalar::Int(3));
        assert!(PaOne::from_i64(ElementKind::UByte, -1).is_missing());
        assert!(PaOne::from_text(ElementKind::Char, "").is_missing());
        assert_eq!(PaOne::from_text(ElementKind::Char, "q").value(), &Scalar::Char(b'q' as u16));
        assert_eq!(PaOne::from_u64(ElementKind::String, 42).as_string(), "42");
        assert!(PaOne::from_f64(ElementKind::Double, f64::NAN).is_missing());
    }

    #[test]
    fn test_accessors() {
        let one = PaOne::from_i64(ElementKind::Short, -4);
        assert_eq!(one.kind(), ElementKind::Short);
        assert_eq!(one.as_f64(), -4.0);
        assert_eq!(one.as_i128(), Some(-4));
        assert_eq!(one.to_string(), "-4");
        assert!(PaOne::missing(ElementKind::Int).as_f64().is_nan());
        assert_eq!(PaOne::missing(ElementKind::Int).to_string(), "");
    }

    #[test]
    fn test_array_round_trip() {
        let source = UShortArray::from_values([40000, 65535])
            .unwrap()
            .with_max_is_missing(true);
        let first = source.get_pa_one(0).unwrap();
        assert_eq!(first.value(), &Scalar::Int(40000));
        assert!(source.get_pa_one(1).unwrap().is_missing());

        let mut target = IntArray::new();
        target.add_pa_one(&first).unwrap();
        target.add_n_pa_one(2, &source.get_pa_one(1).unwrap()).unwrap();
        assert_eq!(target.get(0).unwrap(), 40000);
        assert!(target.max_is_missing());
        assert!(target.is_missing(2).unwrap());
        assert_eq!(target.max_value().value(), &Scalar::Int(i32::MAX as i128 - 1));
    }
}
