//! Char (UTF-16 code unit) and String kinds.

use std::cmp::Ordering;

use array_common::{ArrayError, ArrayResult, ElementKind};
use bytes::{Buf, BufMut};

use super::float::double_text;
use super::{ensure_remaining, parse_float_text, parse_integer_text, Kind};
use crate::array::PrimitiveArray;
use crate::buffer::TypedArray;
use crate::codec::text::{escape_display, json_quote, nccsv_char, nccsv_quote};

/// Character substituted for code points that don't fit in ISO-8859-1.
const LATIN1_REPLACEMENT: u8 = b'?';

fn latin1_byte(code: u32) -> u8 {
    if code <= 0xFF {
        code as u8
    } else {
        LATIN1_REPLACEMENT
    }
}

/// UTF-16 code units. 0xFFFF is always missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharKind;

impl CharKind {
    fn text_of(code: u16) -> String {
        String::from_utf16_lossy(&[code])
    }
}

impl Kind for CharKind {
    type Word = u16;
    type Value = u16;
    type Key = u16;

    const KIND: ElementKind = ElementKind::Char;
    const MISSING_FIXED: bool = true;
    const WIDTH: usize = 2;

    fn sentinel() -> u16 {
        u16::MAX
    }

    fn pack(value: u16) -> u16 {
        value
    }

    fn unpack(word: &u16) -> u16 {
        *word
    }

    fn is_sentinel(word: &u16) -> bool {
        *word == u16::MAX
    }

    fn key(word: &u16) -> u16 {
        *word
    }

    fn compare(a: &u16, b: &u16) -> Ordering {
        a.cmp(b)
    }

    fn hash_term(word: &u16) -> i32 {
        *word as i32
    }

    fn min_word() -> u16 {
        0
    }

    fn max_word() -> u16 {
        u16::MAX - 1
    }

    fn from_i128(value: i128) -> Option<u16> {
        u16::try_from(value).ok()
    }

    fn from_f64(value: f64) -> Option<u16> {
        super::round_half_up(value).and_then(Self::from_i128)
    }

    /// The first UTF-16 unit of the text; empty text is missing.
    fn from_text(text: &str) -> Option<u16> {
        text.encode_utf16().next()
    }

    fn from_char_code(code: u16) -> Option<u16> {
        Some(code)
    }

    fn to_i128(word: &u16) -> Option<i128> {
        Some(*word as i128)
    }

    fn to_f64(word: &u16) -> f64 {
        *word as f64
    }

    fn to_text(word: &u16) -> String {
        Self::text_of(*word)
    }

    /// Escaped so control and non-ASCII units stay visible: `\t`, `\uffff`.
    fn display_text(word: &u16) -> String {
        escape_display(&Self::text_of(*word))
    }

    fn json_text(word: &u16) -> String {
        json_quote(&Self::text_of(*word))
    }

    fn nccsv_data_text(word: &u16) -> String {
        nccsv_quote(&Self::text_of(*word))
    }

    fn nccsv_att_text(word: &u16) -> String {
        nccsv_char(&Self::text_of(*word))
    }

    fn swap_bytes(word: &u16) -> u16 {
        word.swap_bytes()
    }

    fn put_word<B: BufMut>(word: &u16, buf: &mut B) -> ArrayResult<usize> {
        buf.put_u16(*word);
        Ok(2)
    }

    fn get_word<B: Buf>(buf: &mut B) -> ArrayResult<u16> {
        ensure_remaining(buf, 2, "char")?;
        Ok(buf.get_u16())
    }

    /// One ISO-8859-1 byte padded to a 4-byte record.
    fn put_dap<B: BufMut>(word: &u16, buf: &mut B) {
        buf.put_u8(latin1_byte(*word as u32));
        buf.put_bytes(0, 3);
    }

    fn get_dap<B: Buf>(buf: &mut B) -> ArrayResult<u16> {
        ensure_remaining(buf, 4, "char")?;
        let code = buf.get_u8() as u16;
        buf.advance(3);
        Ok(code)
    }

    fn downcast(array: &PrimitiveArray) -> Option<&TypedArray<Self>> {
        match array {
            PrimitiveArray::Char(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap(array: TypedArray<Self>) -> PrimitiveArray {
        PrimitiveArray::Char(array)
    }
}

/// Owned strings. The empty string is always missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringKind;

impl Kind for StringKind {
    type Word = String;
    type Value = String;
    type Key = String;

    const KIND: ElementKind = ElementKind::String;
    const MISSING_FIXED: bool = true;
    const WIDTH: usize = 0;

    fn sentinel() -> String {
        String::new()
    }

    fn pack(value: String) -> String {
        value
    }

    fn unpack(word: &String) -> String {
        word.clone()
    }

    fn is_sentinel(word: &String) -> bool {
        word.is_empty()
    }

    fn key(word: &String) -> String {
        word.clone()
    }

    /// Code point order, with the missing (empty) string last.
    fn compare(a: &String, b: &String) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.cmp(b),
        }
    }

    /// The classic `31 * h + unit` hash over UTF-16 units.
    fn hash_term(word: &String) -> i32 {
        word.encode_utf16()
            .fold(0i32, |acc, unit| acc.wrapping_mul(31).wrapping_add(unit as i32))
    }

    fn min_word() -> String {
        "\u{0}".to_string()
    }

    fn max_word() -> String {
        "\u{FFFF}".to_string()
    }

    fn from_i128(value: i128) -> Option<String> {
        Some(value.to_string())
    }

    fn from_f64(value: f64) -> Option<String> {
        if value.is_nan() {
            None
        } else {
            Some(double_text(value))
        }
    }

    fn from_text(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn from_char_code(code: u16) -> Option<String> {
        Some(CharKind::text_of(code))
    }

    fn to_i128(word: &String) -> Option<i128> {
        parse_integer_text(word)
    }

    fn to_f64(word: &String) -> f64 {
        parse_float_text(word)
    }

    fn to_text(word: &String) -> String {
        word.clone()
    }

    fn json_text(word: &String) -> String {
        json_quote(word)
    }

    fn nccsv_data_text(word: &String) -> String {
        nccsv_quote(word)
    }

    fn nccsv_att_text(word: &String) -> String {
        nccsv_quote(word)
    }

    fn swap_bytes(word: &String) -> String {
        word.clone()
    }

    /// u16 byte length followed by the UTF-8 bytes.
    fn put_word<B: BufMut>(word: &String, buf: &mut B) -> ArrayResult<usize> {
        let len = u16::try_from(word.len()).map_err(|_| {
            ArrayError::invalid_argument(format!(
                "string of {} bytes is too long for the stream encoding",
                word.len()
            ))
        })?;
        buf.put_u16(len);
        buf.put_slice(word.as_bytes());
        Ok(2 + word.len())
    }

    fn get_word<B: Buf>(buf: &mut B) -> ArrayResult<String> {
        ensure_remaining(buf, 2, "string length")?;
        let len = buf.get_u16() as usize;
        ensure_remaining(buf, len, "string")?;
        let mut bytes = vec![0u8; len];
        buf.copy_to_slice(&mut bytes);
        String::from_utf8(bytes)
            .map_err(|e| ArrayError::invalid_data(format!("string is not UTF-8: {}", e)))
    }

    /// XDR string: i32 length, ISO-8859-1 bytes, zero padding to 4 bytes.
    fn put_dap<B: BufMut>(word: &String, buf: &mut B) {
        let bytes: Vec<u8> = word.chars().map(|c| latin1_byte(c as u32)).collect();
        buf.put_i32(bytes.len() as i32);
        buf.put_slice(&bytes);
        buf.put_bytes(0, (4 - bytes.len() % 4) % 4);
    }

    fn get_dap<B: Buf>(buf: &mut B) -> ArrayResult<String> {
        ensure_remaining(buf, 4, "string length")?;
        let len = buf.get_i32();
        let len = usize::try_from(len)
            .map_err(|_| ArrayError::invalid_data(format!("negative string length {}", len)))?;
        let padded = len + (4 - len % 4) % 4;
        ensure_remaining(buf, padded, "string")?;
        let mut bytes = vec![0u8; len];
        buf.copy_to_slice(&mut bytes);
        buf.advance(padded - len);
        let text: String = bytes.iter().map(|b| *b as char).collect();
        Ok(text)
    }

    fn downcast(array: &PrimitiveArray) -> Option<&TypedArray<Self>> {
        match array {
            PrimitiveArray::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn wrap(array: TypedArray<Self>) -> PrimitiveArray {
        PrimitiveArray::String(array)
    }
}
