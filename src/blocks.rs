//! Block-level data structures used by the engine.
//!
//! A checkpointed run splits the layers `[0, T)` into contiguous blocks and
//! keeps only the frontier at the start of each block. A block can then be
//! replayed from its checkpoint whenever its inner frontiers are needed.

/// Checkpoint for a contiguous interval of layers `[start, end)`.
#[derive(Debug, Clone)]
pub struct BlockCheckpoint<F> {
    /// Inclusive start layer.
    pub start: usize,
    /// Exclusive end layer.
    pub end: usize,
    /// Frontier at layer `start`.
    pub frontier: F,
}

impl<F> BlockCheckpoint<F> {
    /// Length of the block in layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the block covers no layers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Balanced block size for `num_layers` layers: `⌈√T⌉`, at least 1.
///
/// With `T / b` checkpoints and one replayed block of `b` frontiers live
/// during backtracking, `b ≈ √T` minimises the number of frontiers held.
#[inline]
pub fn default_block_size(num_layers: usize) -> usize {
    if num_layers <= 1 {
        return 1;
    }
    let mut b = (num_layers as f64).sqrt() as usize;
    // float rounding can land one off in either direction for large T
    while b.saturating_mul(b) < num_layers {
        b += 1;
    }
    while b > 1 && (b - 1).saturating_mul(b - 1) >= num_layers {
        b -= 1;
    }
    b
}
