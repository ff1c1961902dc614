//! The generic growable buffer behind every primitive array.
//!
//! `TypedArray<K>` owns a contiguous buffer of storage words whose length is
//! the capacity; the first `size` words are the logical elements. Slots past
//! `size` always hold default words.

use std::fmt;
use std::marker::PhantomData;

use array_common::{config, ArrayError, ArrayResult, ElementKind};
use tracing::debug;

use crate::kind::Kind;
use crate::memory::{alloc_words, check_array_size, MAX_ARRAY_SIZE};

/// A growable, strongly typed, one-dimensional array.
pub struct TypedArray<K: Kind> {
    words: Vec<K::Word>,
    size: usize,
    max_is_missing: bool,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> TypedArray<K> {
    pub(crate) fn from_parts(words: Vec<K::Word>, size: usize) -> Self {
        Self {
            words,
            size,
            max_is_missing: K::MISSING_FIXED,
            _kind: PhantomData,
        }
    }

    /// Create an empty array with the configured initial capacity.
    pub fn new() -> Self {
        let capacity = config::global().initial_capacity;
        let words = std::iter::repeat_with(K::Word::default)
            .take(capacity)
            .collect();
        Self::from_parts(words, 0)
    }

    /// Create an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> ArrayResult<Self> {
        Ok(Self::from_parts(alloc_words(K::KIND, capacity)?, 0))
    }

    /// Create an array of `len` default elements (zero, or `""` for strings).
    pub fn zeroed(len: usize) -> ArrayResult<Self> {
        Ok(Self::from_parts(alloc_words(K::KIND, len)?, len))
    }

    /// Adopt `words` as the backing buffer without copying.
    pub fn from_words(words: Vec<K::Word>) -> ArrayResult<Self> {
        check_array_size(K::KIND, words.len() as u64)?;
        let size = words.len();
        Ok(Self::from_parts(words, size))
    }

    pub fn from_values<I: IntoIterator<Item = K::Value>>(values: I) -> ArrayResult<Self> {
        Self::from_words(values.into_iter().map(K::pack).collect())
    }

    /// Builder form of [`TypedArray::mark_max_is_missing`]. Passing `false`
    /// leaves the flag as it is; the flag is never lowered.
    pub fn with_max_is_missing(mut self, max_is_missing: bool) -> Self {
        self.max_is_missing |= max_is_missing;
        self
    }

    /// Declare that the sentinel word means missing from now on.
    pub fn mark_max_is_missing(&mut self) {
        self.max_is_missing = true;
    }

    pub fn max_is_missing(&self) -> bool {
        self.max_is_missing
    }

    pub fn kind(&self) -> ElementKind {
        K::KIND
    }

    pub fn element_size(&self) -> usize {
        K::KIND.element_size()
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    pub fn is_integer_kind(&self) -> bool {
        K::KIND.is_integer()
    }

    pub fn is_unsigned(&self) -> bool {
        K::KIND.is_unsigned()
    }

    /// The missing value as a double: NaN for floats and strings, otherwise
    /// the sentinel's logical value (127 for bytes, 65535 for chars, ...).
    pub fn missing_value_as_f64(&self) -> f64 {
        if K::KIND.is_floating() || K::KIND == ElementKind::String {
            f64::NAN
        } else {
            K::to_f64(&K::sentinel())
        }
    }

    #[inline]
    pub(crate) fn word_is_missing(&self, word: &K::Word) -> bool {
        self.max_is_missing && K::is_sentinel(word)
    }

    fn check_index(&self, index: usize) -> ArrayResult<()> {
        if index >= self.size {
            return Err(ArrayError::out_of_bounds(K::KIND, index, self.size));
        }
        Ok(())
    }

    // === Element access ===

    pub fn get(&self, index: usize) -> ArrayResult<K::Value> {
        Ok(K::unpack(self.get_word(index)?))
    }

    pub fn get_word(&self, index: usize) -> ArrayResult<&K::Word> {
        self.check_index(index)?;
        Ok(&self.words[index])
    }

    pub fn set(&mut self, index: usize, value: K::Value) -> ArrayResult<()> {
        self.set_word(index, K::pack(value))
    }

    pub fn set_word(&mut self, index: usize, word: K::Word) -> ArrayResult<()> {
        self.check_index(index)?;
        self.words[index] = word;
        Ok(())
    }

    pub fn is_missing(&self, index: usize) -> ArrayResult<bool> {
        Ok(self.word_is_missing(self.get_word(index)?))
    }

    /// True when the element holds the sentinel word, whether or not that
    /// currently means missing.
    pub fn is_max_value(&self, index: usize) -> ArrayResult<bool> {
        Ok(K::is_sentinel(self.get_word(index)?))
    }

    // === Growth ===

    /// Make room for at least `min_capacity` elements.
    ///
    /// Grows to `max(min_capacity, min(2 * capacity, MAX_ARRAY_SIZE))`. On
    /// error the array is untouched.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> ArrayResult<()> {
        let capacity = self.words.len();
        if min_capacity <= capacity {
            return Ok(());
        }
        check_array_size(K::KIND, min_capacity as u64)?;

        let new_capacity = min_capacity.max(capacity.saturating_mul(2).min(MAX_ARRAY_SIZE));
        let mut words = alloc_words::<K::Word>(K::KIND, new_capacity)?;
        words[..self.size].swap_with_slice(&mut self.words[..self.size]);

        debug!(
            kind = %K::KIND,
            size = self.size,
            from = capacity,
            to = new_capacity,
            "Grew array buffer"
        );
        self.words = words;
        Ok(())
    }

    pub(crate) fn reserve_additional(&mut self, additional: usize) -> ArrayResult<()> {
        let needed = self.size as u64 + additional as u64;
        check_array_size(K::KIND, needed)?;
        self.ensure_capacity(needed as usize)
    }

    /// Shrink the backing buffer to exactly `len()` words.
    pub fn trim_to_size(&mut self) {
        if self.words.len() == self.size {
            return;
        }
        let from = self.words.len();
        self.words.truncate(self.size);
        self.words.shrink_to_fit();
        debug!(kind = %K::KIND, from = from, to = self.size, "Trimmed array buffer");
    }

    // === Mutation ===

    pub fn add(&mut self, value: K::Value) -> ArrayResult<()> {
        self.add_word(K::pack(value))
    }

    pub fn add_word(&mut self, word: K::Word) -> ArrayResult<()> {
        if self.size == self.words.len() {
            self.reserve_additional(1)?;
        }
        self.words[self.size] = word;
        self.size += 1;
        Ok(())
    }

    pub fn add_words(&mut self, words: &[K::Word]) -> ArrayResult<()> {
        self.reserve_additional(words.len())?;
        self.words[self.size..self.size + words.len()].clone_from_slice(words);
        self.size += words.len();
        Ok(())
    }

    /// Append `n` copies of `value`.
    pub fn add_n(&mut self, n: usize, value: K::Value) -> ArrayResult<()> {
        self.add_n_words(n, K::pack(value))
    }

    pub fn add_n_words(&mut self, n: usize, word: K::Word) -> ArrayResult<()> {
        if n == 0 {
            return Ok(());
        }
        self.reserve_additional(n)?;
        self.words[self.size..self.size + n].fill(word);
        self.size += n;
        Ok(())
    }

    /// Insert `value` at `index`, shifting later elements up. `index` may equal `len()`.
    pub fn insert(&mut self, index: usize, value: K::Value) -> ArrayResult<()> {
        self.insert_word(index, K::pack(value))
    }

    pub fn insert_word(&mut self, index: usize, word: K::Word) -> ArrayResult<()> {
        if index > self.size {
            return Err(ArrayError::InsertOutOfBounds {
                kind: K::KIND,
                index,
                size: self.size,
            });
        }
        if self.size == self.words.len() {
            self.reserve_additional(1)?;
        }
        self.words[index..=self.size].rotate_right(1);
        self.words[index] = word;
        self.size += 1;
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> ArrayResult<K::Value> {
        self.check_index(index)?;
        let value = K::unpack(&self.words[index]);
        self.words[index..self.size].rotate_left(1);
        self.size -= 1;
        self.words[self.size] = K::Word::default();
        Ok(value)
    }

    /// Remove the elements in `[from, to)`.
    pub fn remove_range(&mut self, from: usize, to: usize) -> ArrayResult<()> {
        if to > self.size {
            return Err(ArrayError::out_of_bounds(K::KIND, to, self.size));
        }
        if from > to {
            return Err(ArrayError::invalid_argument(format!(
                "{} array remove_range from {} is greater than to {}",
                K::KIND,
                from,
                to
            )));
        }
        if from == to {
            return Ok(());
        }

        let n = to - from;
        self.words[from..self.size].rotate_left(n);
        let new_size = self.size - n;
        self.reset_tail(new_size);
        Ok(())
    }

    /// Drop every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.reset_tail(0);
    }

    /// Shrink the logical size to `new_size`, resetting the vacated slots.
    fn reset_tail(&mut self, new_size: usize) {
        for word in &mut self.words[new_size..self.size] {
            *word = K::Word::default();
        }
        self.size = new_size;
    }

    /// Move the elements in `[first, last)` so they start at `destination`,
    /// where `destination` is a position in the original indexing.
    ///
    /// `move_range(1, 3, 0)` on `[0, 1, 2, 3, 4]` gives `[1, 2, 0, 3, 4]`;
    /// `move_range(1, 2, 4)` gives `[0, 2, 3, 1, 4]`.
    pub fn move_range(&mut self, first: usize, last: usize, destination: usize) -> ArrayResult<()> {
        if last > self.size {
            return Err(ArrayError::out_of_bounds(K::KIND, last, self.size));
        }
        if destination > self.size {
            return Err(ArrayError::out_of_bounds(K::KIND, destination, self.size));
        }
        if first > last {
            return Err(ArrayError::invalid_argument(format!(
                "{} array move_range first {} is greater than last {}",
                K::KIND,
                first,
                last
            )));
        }
        if first == last || destination == first || destination == last {
            return Ok(());
        }
        if destination > first && destination < last {
            return Err(ArrayError::invalid_argument(format!(
                "{} array move_range destination {} is inside [{}, {})",
                K::KIND,
                destination,
                first,
                last
            )));
        }

        let n = last - first;
        if destination < first {
            self.words[destination..last].rotate_right(n);
        } else {
            self.words[first..destination].rotate_left(n);
        }
        Ok(())
    }

    /// Keep only the elements whose `keep` bit is set, preserving order.
    /// Bits past the end of `keep` count as unset.
    pub fn just_keep(&mut self, keep: &[bool]) {
        let mut kept = 0;
        for i in 0..self.size {
            if keep.get(i).copied().unwrap_or(false) {
                if i != kept {
                    self.words.swap(kept, i);
                }
                kept += 1;
            }
        }
        self.reset_tail(kept);
    }

    /// Rearrange so that element `i` becomes the old element `rank[i]`.
    pub fn reorder(&mut self, rank: &[usize]) -> ArrayResult<()> {
        if rank.len() != self.size {
            return Err(ArrayError::invalid_argument(format!(
                "{} array reorder: rank length {} != size {}",
                K::KIND,
                rank.len(),
                self.size
            )));
        }
        if let Some(bad) = rank.iter().find(|r| **r >= self.size) {
            return Err(ArrayError::out_of_bounds(K::KIND, *bad, self.size));
        }

        let mut words = alloc_words::<K::Word>(K::KIND, self.words.len())?;
        for (slot, source) in words.iter_mut().zip(rank) {
            *slot = self.words[*source].clone();
        }
        self.words = words;
        Ok(())
    }

    /// Copy element `from` over element `to`.
    pub fn copy_within_array(&mut self, from: usize, to: usize) -> ArrayResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        self.words[to] = self.words[from].clone();
        Ok(())
    }

    // === Views ===

    /// Exactly `len()` words.
    pub fn to_vec(&self) -> Vec<K::Word> {
        self.words[..self.size].to_vec()
    }

    pub fn as_slice(&self) -> &[K::Word] {
        &self.words[..self.size]
    }

    pub fn as_mut_slice(&mut self) -> &mut [K::Word] {
        &mut self.words[..self.size]
    }

    pub fn into_words(mut self) -> Vec<K::Word> {
        self.words.truncate(self.size);
        self.words
    }

    pub(crate) fn iter_words(&self) -> std::slice::Iter<'_, K::Word> {
        self.words[..self.size].iter()
    }

    /// Every `stride`th element from `start` through `stop` inclusive.
    /// `stop` is clipped to the last element.
    pub fn subset(&self, start: usize, stride: usize, stop: usize) -> ArrayResult<Self> {
        if stride == 0 {
            return Err(ArrayError::invalid_argument(format!(
                "{} array subset stride must be at least 1",
                K::KIND
            )));
        }

        let words = match self.size.checked_sub(1).map(|last| stop.min(last)) {
            Some(stop) if start <= stop => self.words[start..=stop]
                .iter()
                .step_by(stride)
                .cloned()
                .collect(),
            _ => Vec::new(),
        };
        Ok(Self::from_words(words)?.with_max_is_missing(self.max_is_missing))
    }

    /// First index at or after `start` holding `value`.
    pub fn index_of(&self, value: &K::Value, start: usize) -> Option<usize> {
        let target = K::pack(value.clone());
        self.words[..self.size]
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, word)| K::compare(word, &target).is_eq())
            .map(|(i, _)| i)
    }

    /// Last index at or before `start` holding `value`.
    pub fn last_index_of(&self, value: &K::Value, start: usize) -> ArrayResult<Option<usize>> {
        self.check_index(start)?;
        let target = K::pack(value.clone());
        Ok(self.words[..=start]
            .iter()
            .rposition(|word| K::compare(word, &target).is_eq()))
    }

    /// Reverse the byte order of every element.
    pub fn reverse_bytes(&mut self) {
        for word in &mut self.words[..self.size] {
            *word = K::swap_bytes(word);
        }
    }

    /// Flip the top bit of every integer element, converting values that
    /// were read with the wrong signedness. No-op for other kinds.
    pub fn change_signed_to_from_unsigned(&mut self) {
        if !K::KIND.is_integer() {
            return;
        }
        for word in &mut self.words[..self.size] {
            *word = K::flip_sign(word);
        }
    }
}

impl<K: Kind> Default for TypedArray<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Kind> Clone for TypedArray<K> {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            size: self.size,
            max_is_missing: self.max_is_missing,
            _kind: PhantomData,
        }
    }
}

impl<K: Kind> fmt::Debug for TypedArray<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedArray")
            .field("kind", &K::KIND)
            .field("size", &self.size)
            .field("capacity", &self.words.len())
            .field("max_is_missing", &self.max_is_missing)
            .field("words", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntArray, StringArray, UShortArray};

    fn ints(values: &[i32]) -> IntArray {
        IntArray::from_values(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_new_uses_configured_capacity() {
        let array = IntArray::new();
        assert_eq!(array.len(), 0);
        assert_eq!(array.capacity(), config::global().initial_capacity);
        assert!(!array.max_is_missing());
        assert!(StringArray::new().max_is_missing());
    }

    #[test]
    fn test_add_grows_and_keeps_size_le_capacity() {
        let mut array = IntArray::with_capacity(1).unwrap();
        for i in 0..100 {
            array.add(i).unwrap();
            assert!(array.len() <= array.capacity());
        }
        assert_eq!(array.len(), 100);
        assert_eq!(array.to_vec(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_ensure_capacity_doubles() {
        let mut array = IntArray::with_capacity(10).unwrap();
        array.ensure_capacity(11).unwrap();
        assert_eq!(array.capacity(), 20);
        array.ensure_capacity(100).unwrap();
        assert_eq!(array.capacity(), 100);
        array.ensure_capacity(5).unwrap();
        assert_eq!(array.capacity(), 100);
    }

    #[test]
    fn test_ensure_capacity_rejects_above_max() {
        let mut array = ints(&[1, 2]);
        let err = array.ensure_capacity(MAX_ARRAY_SIZE + 1).unwrap_err();
        assert!(matches!(err, ArrayError::CapacityExceeded { .. }));
        assert_eq!(array.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let array = ints(&[1, 2]);
        assert!(matches!(
            array.get(2),
            Err(ArrayError::IndexOutOfBounds { index: 2, size: 2, .. })
        ));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut array = ints(&[1, 3]);
        array.insert(1, 2).unwrap();
        array.insert(3, 4).unwrap();
        assert_eq!(array.to_vec(), vec![1, 2, 3, 4]);
        assert!(matches!(
            array.insert(9, 0),
            Err(ArrayError::InsertOutOfBounds { .. })
        ));

        assert_eq!(array.remove(0).unwrap(), 1);
        assert_eq!(array.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_remove_range() {
        let mut array = ints(&[0, 1, 2, 3, 4]);
        array.remove_range(1, 3).unwrap();
        assert_eq!(array.to_vec(), vec![0, 3, 4]);
        array.remove_range(2, 2).unwrap();
        assert_eq!(array.len(), 3);
        assert!(array.remove_range(2, 1).is_err());
        assert!(array.remove_range(0, 4).is_err());
        assert_eq!(array.to_vec(), vec![0, 3, 4]);
    }

    #[test]
    fn test_move_range() {
        let mut array = ints(&[0, 1, 2, 3, 4]);
        array.move_range(1, 3, 0).unwrap();
        assert_eq!(array.to_vec(), vec![1, 2, 0, 3, 4]);

        let mut array = ints(&[0, 1, 2, 3, 4]);
        array.move_range(1, 2, 4).unwrap();
        assert_eq!(array.to_vec(), vec![0, 2, 3, 1, 4]);

        let mut array = ints(&[0, 1, 2, 3, 4]);
        array.move_range(0, 2, 5).unwrap();
        assert_eq!(array.to_vec(), vec![2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_move_range_noops_and_errors() {
        let mut array = ints(&[0, 1, 2, 3]);
        array.move_range(1, 1, 3).unwrap();
        array.move_range(1, 3, 3).unwrap();
        array.move_range(1, 3, 1).unwrap();
        assert_eq!(array.to_vec(), vec![0, 1, 2, 3]);

        assert!(array.move_range(0, 3, 2).is_err());
        assert!(array.move_range(0, 5, 0).is_err());
        assert_eq!(array.to_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_just_keep() {
        let mut array = ints(&[10, 11, 12, 13, 14]);
        array.just_keep(&[true, false, true]);
        assert_eq!(array.to_vec(), vec![10, 12]);

        let mut array = ints(&[10, 11, 12]);
        array.just_keep(&[false, true, true]);
        assert_eq!(array.to_vec(), vec![11, 12]);
    }

    #[test]
    fn test_reorder() {
        let mut array = ints(&[10, 20, 30]);
        array.reorder(&[2, 0, 1]).unwrap();
        assert_eq!(array.to_vec(), vec![30, 10, 20]);
        assert!(array.reorder(&[0, 1]).is_err());
        assert!(array.reorder(&[0, 1, 3]).is_err());
    }

    #[test]
    fn test_trim_to_size() {
        let mut array = IntArray::with_capacity(50).unwrap();
        array.add(1).unwrap();
        array.trim_to_size();
        assert_eq!(array.capacity(), 1);
        assert_eq!(array.to_vec(), vec![1]);
    }

    #[test]
    fn test_subset() {
        let array = ints(&[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(array.subset(1, 2, 100).unwrap().to_vec(), vec![1, 3, 5]);
        assert_eq!(array.subset(5, 1, 2).unwrap().len(), 0);
        assert!(array.subset(0, 0, 3).is_err());
        assert_eq!(IntArray::new().subset(0, 1, 3).unwrap().len(), 0);
    }

    #[test]
    fn test_index_of() {
        let array = ints(&[5, 6, 5, 7]);
        assert_eq!(array.index_of(&5, 0), Some(0));
        assert_eq!(array.index_of(&5, 1), Some(2));
        assert_eq!(array.index_of(&9, 0), None);
        assert_eq!(array.last_index_of(&5, 3).unwrap(), Some(2));
        assert_eq!(array.last_index_of(&5, 1).unwrap(), Some(0));
        assert!(array.last_index_of(&5, 4).is_err());
    }

    #[test]
    fn test_max_is_missing_never_lowered() {
        let array = UShortArray::from_values([1u16, 65535])
            .unwrap()
            .with_max_is_missing(true)
            .with_max_is_missing(false);
        assert!(array.max_is_missing());
        assert!(array.is_missing(1).unwrap());
        assert!(!array.is_missing(0).unwrap());
        assert_eq!(array.get(1).unwrap(), 65535);
    }

    #[test]
    fn test_change_signed_to_from_unsigned() {
        let mut array = ints(&[i32::MIN, 0, -1]);
        array.change_signed_to_from_unsigned();
        assert_eq!(array.to_vec(), vec![0, i32::MIN, i32::MAX]);
    }

    #[test]
    fn test_reverse_bytes() {
        let mut array = ints(&[1]);
        array.reverse_bytes();
        assert_eq!(array.to_vec(), vec![0x0100_0000]);
    }
}
