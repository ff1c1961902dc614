//! Ordering, ranking, equality and hashing.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use array_common::{config, ArrayResult, ElementKind};
use thiserror::Error;
use tracing::debug;

use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;
use crate::kind::Kind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// The first place an array breaks the expected order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} array isn't sorted in {direction} order: {detail}")]
pub struct OrderViolation {
    pub kind: ElementKind,
    pub direction: SortDirection,
    /// Index of the first offending element.
    pub index: usize,
    pub detail: String,
}

/// Summary of the non-missing elements of an array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountMinMax {
    pub count: usize,
    /// Index of the smallest value (the last one on ties).
    pub min_index: Option<usize>,
    /// Index of the largest value (the last one on ties).
    pub max_index: Option<usize>,
}

impl<K: Kind> TypedArray<K> {
    /// Compare element `index` with element `other_index` of `other`.
    ///
    /// Missing values sort after everything else. Arrays of different kinds
    /// compare as text when either side is text, as doubles when either is
    /// floating point, and as integers otherwise.
    pub fn compare(
        &self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<Ordering> {
        let word = self.get_word(index)?;
        match (self.word_is_missing(word), other.is_missing(other_index)?) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(Ordering::Greater),
            (false, true) => return Ok(Ordering::Less),
            (false, false) => {}
        }

        if let Some(same) = K::downcast(other) {
            return Ok(K::compare(word, same.get_word(other_index)?));
        }

        let other_kind = other.kind();
        Ok(if K::KIND.is_text() || other_kind.is_text() {
            K::value_text(word).cmp(&other.get_string(other_index)?)
        } else if K::KIND.is_floating() || other_kind.is_floating() {
            K::to_f64(word).total_cmp(&other.get_f64(other_index)?)
        } else {
            K::to_i128(word).cmp(&other.get_i128(other_index)?)
        })
    }

    /// Like [`TypedArray::compare`], but text is compared case-insensitively.
    pub fn compare_ignore_case(
        &self,
        index: usize,
        other: &PrimitiveArray,
        other_index: usize,
    ) -> ArrayResult<Ordering> {
        if !K::KIND.is_text() && !other.kind().is_text() {
            return self.compare(index, other, other_index);
        }
        match (self.is_missing(index)?, other.is_missing(other_index)?) {
            (true, true) => Ok(Ordering::Equal),
            (true, false) => Ok(Ordering::Greater),
            (false, true) => Ok(Ordering::Less),
            (false, false) => {
                let left = self.get_string(index)?.to_lowercase();
                let right = other.get_string(other_index)?.to_lowercase();
                Ok(left.cmp(&right))
            }
        }
    }

    /// Sort ascending with missing values last.
    pub fn sort(&mut self) {
        let parallel = self.len() >= config::global().parallel_sort_threshold;
        if parallel {
            debug!(kind = %K::KIND, size = self.len(), "Sorting array in parallel");
        }
        K::sort_words(self.as_mut_slice(), parallel);
    }

    /// Check ascending order. A missing value may only appear last.
    pub fn is_ascending(&self) -> Result<(), OrderViolation> {
        self.check_order(SortDirection::Ascending)
    }

    /// Check descending order. A missing value may only appear first.
    pub fn is_descending(&self) -> Result<(), OrderViolation> {
        self.check_order(SortDirection::Descending)
    }

    fn check_order(&self, direction: SortDirection) -> Result<(), OrderViolation> {
        let violation = |index: usize, detail: String| OrderViolation {
            kind: K::KIND,
            direction,
            index,
            detail,
        };

        for (i, pair) in self.as_slice().windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            match direction {
                SortDirection::Ascending => {
                    if self.word_is_missing(a) {
                        return Err(violation(i, format!("[{}] is a missing value.", i)));
                    }
                    if K::compare(a, b).is_gt() {
                        return Err(violation(
                            i,
                            format!(
                                "[{}]={} > [{}]={}.",
                                i,
                                K::display_text(a),
                                i + 1,
                                K::display_text(b)
                            ),
                        ));
                    }
                }
                SortDirection::Descending => {
                    if self.word_is_missing(b) {
                        return Err(violation(i + 1, format!("[{}] is a missing value.", i + 1)));
                    }
                    if K::compare(a, b).is_lt() {
                        return Err(violation(
                            i,
                            format!(
                                "[{}]={} < [{}]={}.",
                                i,
                                K::display_text(a),
                                i + 1,
                                K::display_text(b)
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Index of the first element equal to its successor.
    pub fn first_tie(&self) -> Option<usize> {
        self.as_slice()
            .windows(2)
            .position(|pair| K::compare(&pair[0], &pair[1]).is_eq())
    }

    /// Rank every element by its position among the sorted distinct values.
    ///
    /// `indices` is cleared and filled with one rank per element. Returns the
    /// sorted distinct values; an array that is already strictly ascending
    /// is its own distinct array and is returned borrowed.
    pub fn make_indices(&self, indices: &mut Vec<usize>) -> Cow<'_, Self> {
        indices.clear();
        let words = self.as_slice();
        indices.reserve(words.len());

        if words.windows(2).all(|pair| K::compare(&pair[0], &pair[1]).is_lt()) {
            indices.extend(0..words.len());
            return Cow::Borrowed(self);
        }

        let mut ranks: HashMap<K::Key, usize> = HashMap::new();
        let mut distinct: Vec<K::Word> = Vec::new();
        for word in words {
            if let Entry::Vacant(entry) = ranks.entry(K::key(word)) {
                entry.insert(0);
                distinct.push(word.clone());
            }
        }

        K::sort_words(&mut distinct, false);
        for (rank, word) in distinct.iter().enumerate() {
            ranks.insert(K::key(word), rank);
        }

        let mut previous: Option<(&K::Word, usize)> = None;
        for word in words {
            let rank = match previous {
                Some((last, rank)) if K::compare(last, word).is_eq() => rank,
                _ => ranks.get(&K::key(word)).copied().unwrap_or_default(),
            };
            indices.push(rank);
            previous = Some((word, rank));
        }

        let len = distinct.len();
        Cow::Owned(Self::from_parts(distinct, len).with_max_is_missing(self.max_is_missing()))
    }

    /// Count the non-missing elements and locate the smallest and largest.
    pub fn get_count_min_max(&self) -> CountMinMax {
        let words = self.as_slice();
        let mut result = CountMinMax::default();
        for (i, word) in words.iter().enumerate() {
            if self.word_is_missing(word) {
                continue;
            }
            result.count += 1;
            match (result.min_index, result.max_index) {
                (Some(min), Some(max)) => {
                    if !K::compare(word, &words[min]).is_gt() {
                        result.min_index = Some(i);
                    }
                    if !K::compare(word, &words[max]).is_lt() {
                        result.max_index = Some(i);
                    }
                }
                _ => {
                    result.min_index = Some(i);
                    result.max_index = Some(i);
                }
            }
        }
        result
    }

    /// Describe the first difference from `other`, if any.
    fn first_difference(&self, other: &Self) -> Option<String> {
        if self.len() != other.len() {
            return Some(format!(
                "The sizes differ: {} != {}.",
                self.len(),
                other.len()
            ));
        }
        for (i, (a, b)) in self.as_slice().iter().zip(other.as_slice()).enumerate() {
            let same_missing = self.word_is_missing(a) == other.word_is_missing(b);
            if !K::compare(a, b).is_eq() || (K::is_sentinel(a) && !same_missing) {
                return Some(format!(
                    "The values differ at [{}]: {}{} != {}{}.",
                    i,
                    K::display_text(a),
                    if self.word_is_missing(a) { " (missing)" } else { "" },
                    K::display_text(b),
                    if other.word_is_missing(b) { " (missing)" } else { "" },
                ));
            }
        }
        None
    }

    /// `Ok` when equal to `other`, otherwise a description of the first
    /// difference.
    pub fn test_equals(&self, other: &Self) -> Result<(), String> {
        match self.first_difference(other) {
            Some(difference) => Err(format!("{} arrays are not equal: {}", K::KIND, difference)),
            None => Ok(()),
        }
    }

    /// `31 * acc + term` over the elements, independent of capacity.
    pub fn hash_code(&self) -> i32 {
        self.as_slice()
            .iter()
            .fold(0i32, |acc, word| acc.wrapping_mul(31).wrapping_add(K::hash_term(word)))
    }
}

impl<K: Kind> PartialEq for TypedArray<K> {
    fn eq(&self, other: &Self) -> bool {
        self.first_difference(other).is_none()
    }
}

impl<K: Kind> Eq for TypedArray<K> {}

impl<K: Kind> Hash for TypedArray<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}
