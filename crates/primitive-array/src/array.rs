//! Kind-erased array.
//!
//! [`PrimitiveArray`] wraps one [`TypedArray`] per element kind. It is what
//! cross-kind operations take as their source and what callers hold when
//! the kind is only known at runtime.

use std::cmp::Ordering;
use std::fmt;

use array_common::{ArrayResult, ElementKind};
use bytes::{Buf, BufMut, Bytes};

use crate::buffer::TypedArray;
use crate::kind::{for_kind, Kind};
use crate::ordering::{CountMinMax, OrderViolation};
use crate::pa_one::PaOne;
use crate::{
    ByteArray, CharArray, DoubleArray, FloatArray, IntArray, LongArray, ShortArray, StringArray,
    UByteArray, UIntArray, ULongArray, UShortArray,
};

/// One typed array of any element kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveArray {
    Byte(ByteArray),
    UByte(UByteArray),
    Short(ShortArray),
    UShort(UShortArray),
    Int(IntArray),
    UInt(UIntArray),
    Long(LongArray),
    ULong(ULongArray),
    Float(FloatArray),
    Double(DoubleArray),
    Char(CharArray),
    String(StringArray),
}

/// Evaluate `$body` with `$a` bound to the wrapped typed array.
macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            PrimitiveArray::Byte($a) => $body,
            PrimitiveArray::UByte($a) => $body,
            PrimitiveArray::Short($a) => $body,
            PrimitiveArray::UShort($a) => $body,
            PrimitiveArray::Int($a) => $body,
            PrimitiveArray::UInt($a) => $body,
            PrimitiveArray::Long($a) => $body,
            PrimitiveArray::ULong($a) => $body,
            PrimitiveArray::Float($a) => $body,
            PrimitiveArray::Double($a) => $body,
            PrimitiveArray::Char($a) => $body,
            PrimitiveArray::String($a) => $body,
        }
    };
}

impl PrimitiveArray {
    // === Construction ===

    /// An empty array of `kind` with room for `capacity` elements.
    pub fn new(kind: ElementKind, capacity: usize) -> ArrayResult<Self> {
        for_kind!(kind, K => Ok(K::wrap(TypedArray::<K>::with_capacity(capacity)?)))
    }

    /// Parse comma-separated text into an array of `kind`.
    pub fn from_csv(kind: ElementKind, text: &str) -> ArrayResult<Self> {
        for_kind!(kind, K => Ok(K::wrap(TypedArray::<K>::from_csv(text)?)))
    }

    /// A copy of this array converted to `kind`.
    pub fn convert_to(&self, kind: ElementKind) -> ArrayResult<Self> {
        if kind == self.kind() {
            return Ok(self.clone());
        }
        for_kind!(kind, K => Ok(K::wrap(TypedArray::<K>::from_array(self)?)))
    }

    /// Reinterpret unsigned storage words as the same-width signed kind.
    /// Values above the signed maximum come out negative. Other kinds are
    /// cloned.
    pub fn make_signed(&self) -> ArrayResult<Self> {
        Ok(match self {
            Self::UByte(a) => Self::Byte(ByteArray::from_words(a.to_vec())?),
            Self::UShort(a) => Self::Short(ShortArray::from_words(a.to_vec())?),
            Self::UInt(a) => Self::Int(IntArray::from_words(a.to_vec())?),
            Self::ULong(a) => Self::Long(LongArray::from_words(a.to_vec())?),
            other => other.clone(),
        })
    }

    /// Borrow the typed array when this is of kind `K`.
    pub fn as_typed<K: Kind>(&self) -> Option<&TypedArray<K>> {
        K::downcast(self)
    }

    // === Introspection ===

    pub fn kind(&self) -> ElementKind {
        dispatch!(self, a => a.kind())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        dispatch!(self, a => a.is_empty())
    }

    pub fn capacity(&self) -> usize {
        dispatch!(self, a => a.capacity())
    }

    pub fn element_size(&self) -> usize {
        dispatch!(self, a => a.element_size())
    }

    pub fn max_is_missing(&self) -> bool {
        dispatch!(self, a => a.max_is_missing())
    }

    pub fn mark_max_is_missing(&mut self) {
        dispatch!(self, a => a.mark_max_is_missing())
    }

    pub fn missing_value_as_f64(&self) -> f64 {
        dispatch!(self, a => a.missing_value_as_f64())
    }

    pub fn is_missing(&self, index: usize) -> ArrayResult<bool> {
        dispatch!(self, a => a.is_missing(index))
    }

    pub fn is_max_value(&self, index: usize) -> ArrayResult<bool> {
        dispatch!(self, a => a.is_max_value(index))
    }

    pub fn min_value(&self) -> PaOne {
        PaOne::min_value(self.kind())
    }

    pub fn max_value(&self) -> PaOne {
        PaOne::max_value(self.kind())
    }

    // === Getters ===

    pub fn get_f64(&self, index: usize) -> ArrayResult<f64> {
        dispatch!(self, a => a.get_f64(index))
    }

    pub fn get_raw_f64(&self, index: usize) -> ArrayResult<f64> {
        dispatch!(self, a => a.get_raw_f64(index))
    }

    pub fn get_i128(&self, index: usize) -> ArrayResult<Option<i128>> {
        dispatch!(self, a => a.get_i128(index))
    }

    pub fn get_raw_i128(&self, index: usize) -> ArrayResult<Option<i128>> {
        dispatch!(self, a => a.get_raw_i128(index))
    }

    pub fn get_i64(&self, index: usize) -> ArrayResult<Option<i64>> {
        dispatch!(self, a => a.get_i64(index))
    }

    pub fn get_string(&self, index: usize) -> ArrayResult<String> {
        dispatch!(self, a => a.get_string(index))
    }

    pub fn get_raw_string(&self, index: usize) -> ArrayResult<String> {
        dispatch!(self, a => a.get_raw_string(index))
    }

    pub fn get_pa_one(&self, index: usize) -> ArrayResult<PaOne> {
        dispatch!(self, a => a.get_pa_one(index))
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, a => a.to_f64_vec())
    }

    pub fn to_string_vec(&self) -> Vec<String> {
        dispatch!(self, a => a.to_string_vec())
    }

    // === Mutation ===

    pub fn add_i64(&mut self, value: i64) -> ArrayResult<()> {
        dispatch!(self, a => a.add_i64(value))
    }

    pub fn add_u64(&mut self, value: u64) -> ArrayResult<()> {
        dispatch!(self, a => a.add_u64(value))
    }

    pub fn add_f64(&mut self, value: f64) -> ArrayResult<()> {
        dispatch!(self, a => a.add_f64(value))
    }

    pub fn add_string(&mut self, text: &str) -> ArrayResult<()> {
        dispatch!(self, a => a.add_string(text))
    }

    pub fn add_char(&mut self, code: u16) -> ArrayResult<()> {
        dispatch!(self, a => a.add_char(code))
    }

    pub fn add_pa_one(&mut self, value: &PaOne) -> ArrayResult<()> {
        dispatch!(self, a => a.add_pa_one(value))
    }

    pub fn add_n_i64(&mut self, n: usize, value: i64) -> ArrayResult<()> {
        dispatch!(self, a => a.add_n_i64(n, value))
    }

    pub fn add_n_f64(&mut self, n: usize, value: f64) -> ArrayResult<()> {
        dispatch!(self, a => a.add_n_f64(n, value))
    }

    pub fn add_n_string(&mut self, n: usize, text: &str) -> ArrayResult<()> {
        dispatch!(self, a => a.add_n_string(n, text))
    }

    pub fn add_n_pa_one(&mut self, n: usize, value: &PaOne) -> ArrayResult<()> {
        dispatch!(self, a => a.add_n_pa_one(n, value))
    }

    pub fn set_i64(&mut self, index: usize, value: i64) -> ArrayResult<()> {
        dispatch!(self, a => a.set_i64(index, value))
    }

    pub fn set_f64(&mut self, index: usize, value: f64) -> ArrayResult<()> {
        dispatch!(self, a => a.set_f64(index, value))
    }

    pub fn set_string(&mut self, index: usize, text: &str) -> ArrayResult<()> {
        dispatch!(self, a => a.set_string(index, text))
    }

    pub fn set_pa_one(&mut self, index: usize, value: &PaOne) -> ArrayResult<()> {
        dispatch!(self, a => a.set_pa_one(index, value))
    }

    pub fn insert_string(&mut self, index: usize, text: &str) -> ArrayResult<()> {
        dispatch!(self, a => a.insert_string(index, text))
    }

    /// Append every value of `other`, converting to this array's kind.
    pub fn append(&mut self, other: &PrimitiveArray) -> ArrayResult<()> {
        dispatch!(self, a => a.append(other))
    }

    pub fn add_from(&mut self, other: &PrimitiveArray, start: usize, count: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.add_from(other, start, count))
    }

    pub fn raw_append(&mut self, other: &PrimitiveArray) -> ArrayResult<()> {
        dispatch!(self, a => a.raw_append(other))
    }

    pub fn set_from(
        &mut self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<()> {
        dispatch!(self, a => a.set_from(index, other, other_index))
    }

    /// Remove element `index`, returning it.
    pub fn remove(&mut self, index: usize) -> ArrayResult<PaOne> {
        dispatch!(self, a => {
            let removed = a.get_pa_one(index)?;
            a.remove(index)?;
            Ok(removed)
        })
    }

    pub fn remove_range(&mut self, from: usize, to: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.remove_range(from, to))
    }

    pub fn clear(&mut self) {
        dispatch!(self, a => a.clear())
    }

    pub fn ensure_capacity(&mut self, min_capacity: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.ensure_capacity(min_capacity))
    }

    pub fn trim_to_size(&mut self) {
        dispatch!(self, a => a.trim_to_size())
    }

    pub fn move_range(&mut self, first: usize, last: usize, destination: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.move_range(first, last, destination))
    }

    pub fn just_keep(&mut self, keep: &[bool]) {
        dispatch!(self, a => a.just_keep(keep))
    }

    pub fn reorder(&mut self, rank: &[usize]) -> ArrayResult<()> {
        dispatch!(self, a => a.reorder(rank))
    }

    pub fn copy_within_array(&mut self, from: usize, to: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.copy_within_array(from, to))
    }

    pub fn subset(&self, start: usize, stride: usize, stop: usize) -> ArrayResult<Self> {
        dispatch!(self, a => Ok(a.subset(start, stride, stop)?.into()))
    }

    pub fn switch_from_to(&mut self, from: &str, to: &str) -> usize {
        dispatch!(self, a => a.switch_from_to(from, to))
    }

    pub fn reverse_bytes(&mut self) {
        dispatch!(self, a => a.reverse_bytes())
    }

    pub fn change_signed_to_from_unsigned(&mut self) {
        dispatch!(self, a => a.change_signed_to_from_unsigned())
    }

    // === Ordering ===

    pub fn compare(
        &self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<Ordering> {
        dispatch!(self, a => a.compare(index, other, other_index))
    }

    pub fn compare_ignore_case(
        &self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<Ordering> {
        dispatch!(self, a => a.compare_ignore_case(index, other, other_index))
    }

    pub fn sort(&mut self) {
        dispatch!(self, a => a.sort())
    }

    pub fn is_ascending(&self) -> Result<(), OrderViolation> {
        dispatch!(self, a => a.is_ascending())
    }

    pub fn is_descending(&self) -> Result<(), OrderViolation> {
        dispatch!(self, a => a.is_descending())
    }

    pub fn first_tie(&self) -> Option<usize> {
        dispatch!(self, a => a.first_tie())
    }

    /// Fill `indices` with each element's rank and return the sorted
    /// distinct values.
    pub fn make_indices(&self, indices: &mut Vec<usize>) -> PrimitiveArray {
        dispatch!(self, a => a.make_indices(indices).into_owned().into())
    }

    pub fn get_count_min_max(&self) -> CountMinMax {
        dispatch!(self, a => a.get_count_min_max())
    }

    pub fn test_equals(&self, other: &PrimitiveArray) -> Result<(), String> {
        dispatch!(self, a => test_same_kind(a, other))
    }

    pub fn hash_code(&self) -> i32 {
        dispatch!(self, a => a.hash_code())
    }

    // === Codecs ===

    pub fn write_to<B: BufMut>(&self, buf: &mut B) -> ArrayResult<usize> {
        dispatch!(self, a => a.write_to(buf))
    }

    pub fn write_element_to<B: BufMut>(&self, index: usize, buf: &mut B) -> ArrayResult<usize> {
        dispatch!(self, a => a.write_element_to(index, buf))
    }

    pub fn to_stream_bytes(&self) -> ArrayResult<Bytes> {
        dispatch!(self, a => a.to_stream_bytes())
    }

    pub fn read_from<B: Buf>(&mut self, buf: &mut B, n: usize) -> ArrayResult<()> {
        dispatch!(self, a => a.read_from(buf, n))
    }

    pub fn externalize_dap<B: BufMut>(&self, buf: &mut B) -> ArrayResult<usize> {
        dispatch!(self, a => a.externalize_dap(buf))
    }

    pub fn to_dap_bytes(&self) -> ArrayResult<Bytes> {
        dispatch!(self, a => a.to_dap_bytes())
    }

    pub fn internalize_dap<B: Buf>(&mut self, buf: &mut B) -> ArrayResult<usize> {
        dispatch!(self, a => a.internalize_dap(buf))
    }

    pub fn get_json_string(&self, index: usize) -> ArrayResult<String> {
        dispatch!(self, a => a.get_json_string(index))
    }

    pub fn to_json_csv_string(&self) -> String {
        dispatch!(self, a => a.to_json_csv_string())
    }

    pub fn get_nccsv_data_string(&self, index: usize) -> ArrayResult<String> {
        dispatch!(self, a => a.get_nccsv_data_string(index))
    }

    pub fn to_nccsv_att_string(&self) -> String {
        dispatch!(self, a => a.to_nccsv_att_string())
    }
}

fn test_same_kind<K: Kind>(array: &TypedArray<K>, other: &PrimitiveArray) -> Result<(), String> {
    match K::downcast(other) {
        Some(same) => array.test_equals(same),
        None => Err(format!(
            "The element kinds differ: {} != {}.",
            K::KIND,
            other.kind()
        )),
    }
}

impl fmt::Display for PrimitiveArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}

impl<K: Kind> From<TypedArray<K>> for PrimitiveArray {
    fn from(array: TypedArray<K>) -> Self {
        K::wrap(array)
    }
}
