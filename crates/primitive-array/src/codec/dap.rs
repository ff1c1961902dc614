//! Legacy DAP/XDR vector codec.
//!
//! ```text
//! +-----------+-----------+----------------------------------+
//! | count i32 | count i32 | count records, each 4-byte aligned|
//! +-----------+-----------+----------------------------------+
//! ```
//!
//! Records: 8/16-bit integers are sign-extended storage words in an i32
//! slot, 32-bit integers and floats take 4 bytes, 64-bit kinds 8 bytes, a
//! char is one ISO-8859-1 byte plus 3 zero bytes, and a string is an XDR
//! string (i32 length, ISO-8859-1 bytes, zero padding).

use array_common::{ArrayError, ArrayResult, ElementKind};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::warn;

use crate::buffer::TypedArray;
use crate::kind::{ensure_remaining, Kind};

/// Size of the two count words that start every vector.
pub const DAP_HEADER_LEN: usize = 8;

/// Bytes per record for `kind`, or `None` for variable-length strings.
pub fn dap_record_width(kind: ElementKind) -> Option<usize> {
    match kind {
        ElementKind::Long | ElementKind::ULong | ElementKind::Double => Some(8),
        ElementKind::String => None,
        _ => Some(4),
    }
}

impl<K: Kind> TypedArray<K> {
    /// Write the array as a DAP vector. Returns the bytes written.
    pub fn externalize_dap<B: BufMut>(&self, buf: &mut B) -> ArrayResult<usize> {
        let count = i32::try_from(self.len()).map_err(|_| {
            ArrayError::invalid_argument(format!(
                "{} array of {} elements is too large for a DAP vector",
                K::KIND,
                self.len()
            ))
        })?;

        let mut staged = BytesMut::with_capacity(
            DAP_HEADER_LEN + self.len() * dap_record_width(K::KIND).unwrap_or(8),
        );
        staged.put_i32(count);
        staged.put_i32(count);
        for word in self.iter_words() {
            K::put_dap(word, &mut staged);
        }

        let written = staged.len();
        buf.put(staged);
        Ok(written)
    }

    pub fn to_dap_bytes(&self) -> ArrayResult<Bytes> {
        let mut buf = BytesMut::new();
        self.externalize_dap(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Append the elements of a DAP vector read from `buf`. Returns the
    /// bytes consumed. Negative counts and truncated input are rejected
    /// before anything is appended.
    pub fn internalize_dap<B: Buf>(&mut self, buf: &mut B) -> ArrayResult<usize> {
        let before = buf.remaining();
        ensure_remaining(buf, DAP_HEADER_LEN, "DAP vector header")?;
        let count = buf.get_i32();
        let repeat = buf.get_i32();
        if repeat != count {
            warn!(
                kind = %K::KIND,
                count = count,
                repeat = repeat,
                "DAP vector header counts disagree"
            );
        }
        let count = usize::try_from(count).map_err(|_| {
            ArrayError::invalid_data(format!("negative DAP element count {}", count))
        })?;

        if let Some(width) = dap_record_width(K::KIND) {
            let needed = count.checked_mul(width).ok_or_else(|| {
                ArrayError::invalid_data(format!("DAP element count {} is too large", count))
            })?;
            ensure_remaining(buf, needed, "DAP vector")?;
        }

        let mut words = Vec::with_capacity(count.min(buf.remaining() / 4));
        for _ in 0..count {
            words.push(K::get_dap(buf)?);
        }
        self.add_words(&words)?;
        Ok(before - buf.remaining())
    }
}
