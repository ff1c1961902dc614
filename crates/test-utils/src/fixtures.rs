//! Common test fixtures.
//!
//! Known inputs with known answers, shared by unit and integration tests.

/// Inputs and expected outputs of the worked scenarios.
pub mod scenario {
    /// Raw UShort storage words: 1, and the sentinel bit pattern.
    pub const USHORT_WORDS: [i16; 2] = [0x0001, -1];

    /// The char sentinel (a noncharacter code point).
    pub const CHAR_SENTINEL: u16 = 0xFFFF;

    pub const MOVE_INPUT: [i32; 5] = [0, 1, 2, 3, 4];
    /// `move_range(1, 3, 0)` on [`MOVE_INPUT`].
    pub const MOVE_TO_FRONT: [i32; 5] = [1, 2, 0, 3, 4];
    /// `move_range(1, 2, 4)` on [`MOVE_INPUT`].
    pub const MOVE_TO_BACK: [i32; 5] = [0, 2, 3, 1, 4];

    pub const RANK_INPUT: [i32; 4] = [25, 1, 1, 10];
    pub const RANK_EXPECTED: [usize; 4] = [2, 0, 0, 1];
    pub const RANK_DISTINCT: [i32; 3] = [1, 10, 25];

    pub const DAP_CHARS: [u16; 3] = [b'x' as u16, b'y' as u16, b'z' as u16];
    /// Count twice plus three padded records.
    pub const DAP_CHARS_LEN: usize = 4 + 4 + 4 * 3;
}

/// CSV text samples.
pub mod csv {
    /// Quoted items, an embedded comma and a doubled quote.
    pub const QUOTED: &str = r#"a, "b,c", "say ""hi""", "#;
    pub const QUOTED_ITEMS: [&str; 4] = ["a", "b,c", "say \"hi\"", ""];

    /// Integers with a hex literal, a float to round and junk.
    pub const MIXED_INTS: &str = "1, 0x1F, 2.5, -7, junk, ";

    /// Doubles with the spellings of the special values.
    pub const SPECIAL_DOUBLES: &str = "NaN, Infinity, -Infinity, 1e300, -0.0";

    /// Quoted chars with backslash escapes, and a blank (missing) item.
    pub const ESCAPED_CHARS: &str = r#""\t", a, "\n", "\u20AC", "#;
}
