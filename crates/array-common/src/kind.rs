//! The closed set of element kinds a primitive array can hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Element kind of a primitive array. Fixed for the lifetime of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Char,
    String,
}

impl ElementKind {
    /// Every kind, in promotion-table order.
    pub const ALL: [ElementKind; 12] = [
        ElementKind::Byte,
        ElementKind::UByte,
        ElementKind::Short,
        ElementKind::UShort,
        ElementKind::Int,
        ElementKind::UInt,
        ElementKind::Long,
        ElementKind::ULong,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::Char,
        ElementKind::String,
    ];

    /// Position of this kind in [`ElementKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The name used in metadata and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Byte => "byte",
            ElementKind::UByte => "ubyte",
            ElementKind::Short => "short",
            ElementKind::UShort => "ushort",
            ElementKind::Int => "int",
            ElementKind::UInt => "uint",
            ElementKind::Long => "long",
            ElementKind::ULong => "ulong",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::Char => "char",
            ElementKind::String => "String",
        }
    }

    /// Number of bytes per element. Strings aren't fixed width, so this
    /// returns a nominal 20.
    pub fn element_size(self) -> usize {
        match self {
            ElementKind::Byte | ElementKind::UByte => 1,
            ElementKind::Short | ElementKind::UShort | ElementKind::Char => 2,
            ElementKind::Int | ElementKind::UInt | ElementKind::Float => 4,
            ElementKind::Long | ElementKind::ULong | ElementKind::Double => 8,
            ElementKind::String => 20,
        }
    }

    /// True for the integer kinds (in the math sense). Char is not one.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ElementKind::Byte
                | ElementKind::UByte
                | ElementKind::Short
                | ElementKind::UShort
                | ElementKind::Int
                | ElementKind::UInt
                | ElementKind::Long
                | ElementKind::ULong
        )
    }

    /// True for the unsigned integer kinds.
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            ElementKind::UByte | ElementKind::UShort | ElementKind::UInt | ElementKind::ULong
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(self, ElementKind::Float | ElementKind::Double)
    }

    /// True for Char and String.
    pub fn is_text(self) -> bool {
        matches!(self, ElementKind::Char | ElementKind::String)
    }

    /// Suffix appended to numeric literals in NCCSV attribute lists.
    pub fn nccsv_suffix(self) -> &'static str {
        match self {
            ElementKind::Byte => "b",
            ElementKind::UByte => "ub",
            ElementKind::Short => "s",
            ElementKind::UShort => "us",
            ElementKind::Int => "i",
            ElementKind::UInt => "ui",
            ElementKind::Long => "L",
            ElementKind::ULong => "uL",
            ElementKind::Float => "f",
            ElementKind::Double => "d",
            ElementKind::Char | ElementKind::String => "",
        }
    }

    /// The signed kind sharing this kind's storage word, if this is unsigned.
    pub fn signed_counterpart(self) -> Option<ElementKind> {
        match self {
            ElementKind::UByte => Some(ElementKind::Byte),
            ElementKind::UShort => Some(ElementKind::Short),
            ElementKind::UInt => Some(ElementKind::Int),
            ElementKind::ULong => Some(ElementKind::Long),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    /// Parse from name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ElementKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().to_lowercase() == lower)
            .ok_or_else(|| format!("unknown element kind: {}", s))
    }
}
