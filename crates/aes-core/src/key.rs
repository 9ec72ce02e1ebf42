//! Key types for AES-128 and AES-256.

use crate::block::Block;

/// Largest schedule we ever build (AES-256: 14 rounds + initial whitening).
pub(crate) const MAX_ROUND_KEYS: usize = 15;

/// AES key of either supported size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AesKey {
    /// 128-bit key, 10 rounds.
    Aes128([u8; 16]),
    /// 256-bit key, 14 rounds.
    Aes256([u8; 32]),
}

impl AesKey {
    /// Builds a key from raw bytes; only 16- and 32-byte inputs are accepted.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        match bytes.len() {
            16 => {
                let mut key = [0u8; 16];
                key.copy_from_slice(bytes);
                Some(Self::Aes128(key))
            }
            32 => {
                let mut key = [0u8; 32];
                key.copy_from_slice(bytes);
                Some(Self::Aes256(key))
            }
            _ => None,
        }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Aes128(key) => key.as_slice(),
            Self::Aes256(key) => key.as_slice(),
        }
    }

    /// Number of cipher rounds (`Nr`) for this key size.
    pub fn rounds(&self) -> usize {
        self.as_bytes().len() / 4 + 6
    }
}

impl From<[u8; 16]> for AesKey {
    fn from(value: [u8; 16]) -> Self {
        Self::Aes128(value)
    }
}

impl From<[u8; 32]> for AesKey {
    fn from(value: [u8; 32]) -> Self {
        Self::Aes256(value)
    }
}

/// Expanded round keys; only the first `rounds + 1` entries are populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    rounds: usize,
}

impl RoundKeys {
    pub(crate) fn new(keys: [Block; MAX_ROUND_KEYS], rounds: usize) -> Self {
        Self { keys, rounds }
    }

    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        debug_assert!(round <= self.rounds);
        &self.keys[round]
    }

    /// Number of cipher rounds the schedule was built for.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_accepts_supported_sizes() {
        assert_eq!(AesKey::from_slice(&[0u8; 16]).map(|k| k.rounds()), Some(10));
        assert_eq!(AesKey::from_slice(&[0u8; 32]).map(|k| k.rounds()), Some(14));
        assert!(AesKey::from_slice(&[0u8; 24]).is_none());
        assert!(AesKey::from_slice(&[]).is_none());
    }
}
