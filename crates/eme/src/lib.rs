//! Tweakable wide-block encryption for the keyed permutation rounds.
//!
//! The [`WideBlockCipher`] trait is the seam the round composer is written
//! against; [`Eme`] implements it with the EME (ECB-Mix-ECB) mode of Halevi and
//! Rogaway on top of `aes-core`. EME turns a 16-byte block cipher into a
//! length-preserving permutation over buffers of 1 to 128 blocks, where every
//! output byte depends on every input byte and on the tweak.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod mode;

pub use crate::error::EmeError;
pub use crate::mode::{Direction, Eme, MAX_BLOCKS, TWEAK_BYTES};

pub use aes_core::BLOCK_BYTES;

/// A keyed, tweakable, length-preserving permutation over block-aligned buffers.
///
/// For a fixed key and tweak, `decrypt(tweak, encrypt(tweak, p)?)? == p`.
pub trait WideBlockCipher {
    /// Encrypts `input`, returning a fresh buffer of the same length.
    fn encrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError>;

    /// Decrypts `input`, returning a fresh buffer of the same length.
    fn decrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError>;
}

impl<C: WideBlockCipher + ?Sized> WideBlockCipher for &C {
    fn encrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError> {
        (**self).encrypt(tweak, input)
    }

    fn decrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError> {
        (**self).decrypt(tweak, input)
    }
}
