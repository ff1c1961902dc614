//! Common types shared across the primitive-array crates.

pub mod config;
pub mod error;
pub mod kind;

pub use config::ArrayConfig;
pub use error::{ArrayError, ArrayResult, ErrorCategory};
pub use kind::ElementKind;
