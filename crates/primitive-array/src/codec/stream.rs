//! Big-endian binary stream codec.
//!
//! Fixed-width kinds write their storage words; chars are u16 code units and
//! strings are a u16 byte length followed by UTF-8.

use array_common::{ArrayError, ArrayResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::buffer::TypedArray;
use crate::kind::{ensure_remaining, Kind};

impl<K: Kind> TypedArray<K> {
    /// Write every element. Returns the bytes used per element: 0 for an
    /// empty array, and for strings the size of the last one written.
    ///
    /// Nothing reaches `buf` if an element can't be encoded.
    pub fn write_to<B: BufMut>(&self, buf: &mut B) -> ArrayResult<usize> {
        let mut staged = BytesMut::with_capacity(self.len() * K::WIDTH.max(2));
        let mut width = 0;
        for word in self.iter_words() {
            width = K::put_word(word, &mut staged)?;
        }
        buf.put(staged);
        Ok(width)
    }

    /// Write one element, returning the bytes written.
    pub fn write_element_to<B: BufMut>(&self, index: usize, buf: &mut B) -> ArrayResult<usize> {
        K::put_word(self.get_word(index)?, buf)
    }

    /// The whole array in the stream encoding.
    pub fn to_stream_bytes(&self) -> ArrayResult<Bytes> {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Append `n` elements read from `buf`. On error nothing is appended.
    pub fn read_from<B: Buf>(&mut self, buf: &mut B, n: usize) -> ArrayResult<()> {
        if K::WIDTH > 0 {
            let needed = n.checked_mul(K::WIDTH).ok_or_else(|| {
                ArrayError::invalid_data(format!("{} element count {} is too large", K::KIND, n))
            })?;
            ensure_remaining(buf, needed, K::KIND.name())?;
        }

        let mut words = Vec::with_capacity(n.min(buf.remaining()));
        for _ in 0..n {
            words.push(K::get_word(buf)?);
        }
        self.add_words(&words)
    }
}
