//! Error type for the wide-block mode.

use thiserror::Error;

/// Failures reported by [`crate::Eme`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmeError {
    /// Input is empty, not a multiple of the block size, or too long.
    #[error("invalid input length {len}: expected 1 to {max_blocks} blocks of 16 bytes")]
    InvalidLength {
        /// Offending length in bytes.
        len: usize,
        /// Largest supported number of blocks.
        max_blocks: usize,
    },

    /// Tweak is not exactly one block long.
    #[error("invalid tweak length {len}: expected 16 bytes")]
    InvalidTweakLength {
        /// Offending length in bytes.
        len: usize,
    },

    /// Key is neither 16 nor 32 bytes.
    #[error("invalid key length {len}: expected 16 or 32 bytes")]
    InvalidKeyLength {
        /// Offending length in bytes.
        len: usize,
    },
}
