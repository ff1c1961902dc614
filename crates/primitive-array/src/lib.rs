//! Growable typed columnar arrays with sentinel missing values.
//!
//! Each array holds values of a single [`ElementKind`] in a contiguous
//! buffer of native words. Missing values are encoded in-band: every kind
//! reserves one sentinel word (the integer maximum, NaN, U+FFFF, or the
//! empty string) that reads as missing while the array's `max_is_missing`
//! flag is raised. Unsigned kinds are stored in same-width signed words.
//!
//! # Architecture
//!
//! ```text
//! PrimitiveArray (kind chosen at runtime)
//!      │
//!      ▼
//! TypedArray<K: Kind>
//!      │
//!      ├─► kind      sentinel, packing, ordering, per-word codecs
//!      ├─► promote   needed_kind table, cross-kind copies
//!      ├─► ordering  compare, sort, ranking, equality, hashing
//!      └─► codec     stream, DAP/XDR and text encodings
//! ```
//!
//! # Example
//!
//! ```
//! use primitive_array::{ElementKind, IntArray, PrimitiveArray};
//!
//! let mut ints = IntArray::from_values([25, 1, 1, 10])?;
//! ints.add_f64(f64::NAN)?;
//! assert!(ints.max_is_missing());
//!
//! let mut ranks = Vec::new();
//! let distinct = ints.make_indices(&mut ranks);
//! assert_eq!(ranks, vec![2, 0, 0, 1, 3]);
//! assert_eq!(distinct.len(), 4);
//!
//! let dynamic: PrimitiveArray = ints.into();
//! let doubles = dynamic.convert_to(ElementKind::Double)?;
//! assert!(doubles.get_f64(4)?.is_nan());
//! # Ok::<(), primitive_array::ArrayError>(())
//! ```

pub mod array;
pub mod buffer;
pub mod codec;
pub mod kind;
pub mod ordering;
pub mod pa_one;
pub mod promote;

mod memory;

pub use array::PrimitiveArray;
pub use array_common::{config, ArrayConfig, ArrayError, ArrayResult, ElementKind, ErrorCategory};
pub use buffer::TypedArray;
pub use codec::{dap_record_width, split_csv};
pub use kind::Kind;
pub use memory::MAX_ARRAY_SIZE;
pub use ordering::{CountMinMax, OrderViolation, SortDirection};
pub use pa_one::{PaOne, Scalar};
pub use promote::{conversion_path, needed_kind, ConversionPath};

pub type ByteArray = TypedArray<kind::ByteKind>;
pub type UByteArray = TypedArray<kind::UByteKind>;
pub type ShortArray = TypedArray<kind::ShortKind>;
pub type UShortArray = TypedArray<kind::UShortKind>;
pub type IntArray = TypedArray<kind::IntKind>;
pub type UIntArray = TypedArray<kind::UIntKind>;
pub type LongArray = TypedArray<kind::LongKind>;
pub type ULongArray = TypedArray<kind::ULongKind>;
pub type FloatArray = TypedArray<kind::FloatKind>;
pub type DoubleArray = TypedArray<kind::DoubleKind>;
pub type CharArray = TypedArray<kind::CharKind>;
pub type StringArray = TypedArray<kind::StringKind>;
