//! Error taxonomy for the keyed permutation.

use eme::EmeError;
use thiserror::Error;

/// Every failure surfaced by this crate. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum PrpError {
    /// The integer does not fit in the fixed-width block.
    #[error("value needs {bits} bits but the block holds {width} bytes")]
    ValueTooLarge {
        /// Bit length of the rejected value.
        bits: usize,
        /// Block width in bytes.
        width: usize,
    },

    /// The RSA prime search failed.
    #[error("trapdoor key generation failed: {0}")]
    KeyGenerationFailure(#[source] rsa::Error),

    /// The random source could not supply bytes.
    #[error("secure randomness unavailable: {0}")]
    EntropyUnavailable(#[source] rand::Error),

    /// The wide-block cipher rejected its input, tweak or key.
    #[error("wide-block cipher: {0}")]
    WideBlock(#[from] EmeError),

    /// A block of the wrong width was handed to a session.
    #[error("block width mismatch: expected {expected} bytes, found {found}")]
    BlockWidthMismatch {
        /// Width the session was configured for.
        expected: usize,
        /// Width that was supplied.
        found: usize,
    },

    /// `e` and `d` do not invert each other modulo `N`.
    #[error("public and private exponents are not inverse modulo N")]
    MismatchedExponents,

    /// Parameters violate a session precondition.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
