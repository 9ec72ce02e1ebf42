//! Fixed-width big-endian conversion between integers and blocks.

use num_traits::Zero;
use rsa::BigUint;

use crate::error::PrpError;

/// A block of exactly `W` bytes, read as a big-endian integer in `[0, 2^(8W))`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainBlock(Vec<u8>);

impl DomainBlock {
    /// An all-zero block of `width` bytes.
    pub fn zeroed(width: usize) -> Self {
        Self(vec![0u8; width])
    }

    /// Width in bytes.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the block, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for DomainBlock {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for DomainBlock {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Writes `value` big-endian into a `width`-byte block, left-padded with zeros.
pub fn to_fixed_width(value: &BigUint, width: usize) -> Result<DomainBlock, PrpError> {
    let bits = value.bits();
    if bits > width * 8 {
        return Err(PrpError::ValueTooLarge { bits, width });
    }
    let mut block = DomainBlock::zeroed(width);
    if value.is_zero() {
        return Ok(block);
    }
    let bytes = value.to_bytes_be();
    block.0[width - bytes.len()..].copy_from_slice(&bytes);
    Ok(block)
}

/// Reads a block back as an unsigned integer. Never fails.
pub fn from_fixed_width(block: &DomainBlock) -> BigUint {
    BigUint::from_bytes_be(block.as_bytes())
}
