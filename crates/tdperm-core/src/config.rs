//! Session parameters, fixed for a deployment and passed explicitly.

use eme::{BLOCK_BYTES, MAX_BLOCKS, TWEAK_BYTES};
use serde::{Deserialize, Serialize};

use crate::error::PrpError;

const DOMAIN_ALIGN_BITS: usize = BLOCK_BYTES * 8;

/// Static parameters describing a keyed permutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Bit length of the RSA modulus `N`.
    pub modulus_bits: usize,
    /// Width `B` of the extended domain in bits.
    pub domain_bits: usize,
    /// Number of rounds `R` applied per encode/decode call.
    pub rounds: usize,
    /// Symmetric key length in bytes (16 for AES-128, 32 for AES-256).
    pub key_bytes: usize,
    /// EME tweak length in bytes.
    pub tweak_bytes: usize,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            modulus_bits: 2048,
            domain_bits: 4096,
            rounds: 20,
            key_bytes: 32,
            tweak_bytes: TWEAK_BYTES,
        }
    }
}

impl DomainConfig {
    /// Block width `W = ceil(B / 8)` in bytes.
    pub fn block_bytes(&self) -> usize {
        self.domain_bits.div_ceil(8)
    }

    /// Returns a copy with a different round count.
    pub fn with_rounds(self, rounds: usize) -> Self {
        Self { rounds, ..self }
    }

    /// Checks every precondition the rounds rely on.
    pub fn validate(&self) -> Result<(), PrpError> {
        if self.domain_bits <= self.modulus_bits {
            return Err(PrpError::InvalidConfig(format!(
                "domain width {} bits must exceed modulus width {} bits",
                self.domain_bits, self.modulus_bits
            )));
        }
        if self.domain_bits % DOMAIN_ALIGN_BITS != 0 {
            return Err(PrpError::InvalidConfig(format!(
                "domain width {} bits is not a multiple of {DOMAIN_ALIGN_BITS}",
                self.domain_bits
            )));
        }
        if self.block_bytes() > MAX_BLOCKS * BLOCK_BYTES {
            return Err(PrpError::InvalidConfig(format!(
                "block of {} bytes exceeds the {} byte wide-block limit",
                self.block_bytes(),
                MAX_BLOCKS * BLOCK_BYTES
            )));
        }
        if !matches!(self.key_bytes, 16 | 32) {
            return Err(PrpError::InvalidConfig(format!(
                "symmetric key must be 16 or 32 bytes, got {}",
                self.key_bytes
            )));
        }
        if self.tweak_bytes != TWEAK_BYTES {
            return Err(PrpError::InvalidConfig(format!(
                "tweak must be {TWEAK_BYTES} bytes, got {}",
                self.tweak_bytes
            )));
        }
        Ok(())
    }
}
