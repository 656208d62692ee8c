//! Render request batching
//!
//! The image-render endpoint limits how many identifiers a single request may
//! carry, so identifiers are split into contiguous batches before rendering.

pub use crate::config::DEFAULT_BATCH_SIZE;

/// Split `ids` into contiguous batches of at most `batch_size` identifiers.
///
/// Order is preserved and no batch is empty; an empty input yields no batches.
/// A `batch_size` of zero is treated as one.
pub fn plan<S: Clone>(ids: &[S], batch_size: usize) -> Vec<Vec<S>> {
    ids.chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}
