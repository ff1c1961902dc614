//! Serialization codecs.
//!
//! Each codec is an `impl` block on [`TypedArray`](crate::TypedArray) and
//! always covers exactly the logical elements, never the spare capacity.
//!
//! - [`stream`]: big-endian binary words
//! - [`dap`]: the legacy DAP/XDR vector encoding
//! - [`text`]: delimited display, JSON, NCCSV and CSV parsing

pub mod dap;
pub mod stream;
pub mod text;

pub use dap::{dap_record_width, DAP_HEADER_LEN};
pub use text::split_csv;
