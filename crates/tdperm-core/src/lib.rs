//! Keyed permutation over a wide fixed-width domain.
//!
//! An RSA trapdoor permutation only permutes `[0, N)`. This crate lifts it to
//! `[0, 2^B)` with a row-wise domain extension, interleaves it with a keyed EME
//! wide-block permutation, and iterates the pair for a configurable number of
//! rounds:
//!
//! - [`codec`]: integer ⇄ fixed-width big-endian block conversion.
//! - [`trapdoor`]: modulus/exponent generation and modular exponentiation.
//! - [`extend`]: the domain extender turning a `[0, N)` permutation into a `[0, 2^B)` one.
//! - [`rounds`]: the round composer and its exact inverse.
//! - [`session`]: a ready-to-use [`KeyedPermutation`] bound to one configuration.
//!
//! Both exponents are held by the same party: the private exponent drives the
//! encode direction and the public exponent the decode direction.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod extend;
pub mod rng;
pub mod rounds;
pub mod session;
pub mod trapdoor;

pub use rsa::BigUint;

pub use crate::codec::{from_fixed_width, to_fixed_width, DomainBlock};
pub use crate::config::DomainConfig;
pub use crate::error::PrpError;
pub use crate::extend::{BasePermutation, DomainExtender};
pub use crate::rng::{random_bytes, secure_rng, SecureRng};
pub use crate::rounds::RoundComposer;
pub use crate::session::KeyedPermutation;
pub use crate::trapdoor::{forward, TrapdoorExponent, TrapdoorKey};
pub use eme::{Eme, EmeError, WideBlockCipher};
