//! Allocation guard for array buffers.
//!
//! Every buffer allocation goes through [`alloc_words`], which checks the
//! request against [`MAX_ARRAY_SIZE`] and the configured memory budget and
//! then reserves fallibly, so an impossible request is reported instead of
//! aborting the process.

use array_common::{config, ArrayError, ArrayResult, ElementKind};
use tracing::warn;

/// Largest capacity an array may have.
pub const MAX_ARRAY_SIZE: usize = i32::MAX as usize - 8;

/// Reject capacities above [`MAX_ARRAY_SIZE`].
pub(crate) fn check_array_size(kind: ElementKind, requested: u64) -> ArrayResult<()> {
    if requested > MAX_ARRAY_SIZE as u64 {
        warn!(
            kind = %kind,
            requested = requested,
            max = MAX_ARRAY_SIZE,
            "Refusing array capacity above maximum array size"
        );
        return Err(ArrayError::CapacityExceeded {
            kind,
            requested,
            max: MAX_ARRAY_SIZE,
        });
    }
    Ok(())
}

/// Reject an allocation of `bytes` when it exceeds `limit`.
pub(crate) fn check_memory_budget(
    kind: ElementKind,
    bytes: u64,
    limit: Option<u64>,
) -> ArrayResult<()> {
    match limit {
        Some(limit) if bytes > limit => {
            warn!(
                kind = %kind,
                bytes = bytes,
                limit = limit,
                "Refusing array allocation above memory budget"
            );
            Err(ArrayError::OutOfMemory { kind, bytes })
        }
        _ => Ok(()),
    }
}

/// Allocate a buffer of `len` default words.
pub(crate) fn alloc_words<W: Default>(kind: ElementKind, len: usize) -> ArrayResult<Vec<W>> {
    check_array_size(kind, len as u64)?;

    let bytes = len as u64 * std::mem::size_of::<W>() as u64;
    check_memory_budget(kind, bytes, config::global().memory_limit_bytes())?;

    let mut words = Vec::new();
    words.try_reserve_exact(len).map_err(|_| {
        warn!(kind = %kind, bytes = bytes, "Allocator refused array buffer");
        ArrayError::OutOfMemory { kind, bytes }
    })?;
    words.resize_with(len, W::default);
    Ok(words)
}
