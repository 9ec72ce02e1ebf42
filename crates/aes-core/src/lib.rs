//! Reference AES implementation used by the EME wide-block mode.
//!
//! This crate follows FIPS-197 and provides:
//! - Key schedules for AES-128 and AES-256.
//! - Single-block encryption and decryption.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod key;
mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block, BLOCK_BYTES};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::key::{AesKey, RoundKeys};
