//! On-disk session material for the driver.

use serde::{Deserialize, Serialize};
use tdperm_core::{BigUint, DomainConfig, KeyedPermutation, TrapdoorKey};

/// Everything needed to rebuild a [`KeyedPermutation`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFile {
    /// Format version tag.
    pub version: u32,
    /// Session parameters.
    pub config: DomainConfig,
    /// Modulus `N`, big-endian.
    pub modulus: Vec<u8>,
    /// Public exponent `e`, big-endian.
    pub public_exponent: Vec<u8>,
    /// Private exponent `d`, big-endian.
    pub private_exponent: Vec<u8>,
    /// EME key.
    pub symmetric_key: Vec<u8>,
    /// EME tweak.
    pub tweak: Vec<u8>,
}

/// Current session file format.
pub const SESSION_FILE_VERSION: u32 = 1;

impl SessionFile {
    /// Snapshots the key material of `perm`.
    pub fn capture(perm: &KeyedPermutation) -> Self {
        let key = perm.trapdoor_key();
        Self {
            version: SESSION_FILE_VERSION,
            config: *perm.config(),
            modulus: key.modulus().to_bytes_be(),
            public_exponent: key.public_exponent().to_bytes_be(),
            private_exponent: key.private_exponent().to_bytes_be(),
            symmetric_key: perm.symmetric_key().to_vec(),
            tweak: perm.tweak().to_vec(),
        }
    }

    /// Rebuilds the session, re-checking the exponent pair and parameters.
    pub fn restore(&self) -> anyhow::Result<KeyedPermutation> {
        anyhow::ensure!(
            self.version == SESSION_FILE_VERSION,
            "unsupported session file version {}",
            self.version
        );
        let key = TrapdoorKey::from_components(
            BigUint::from_bytes_be(&self.modulus),
            BigUint::from_bytes_be(&self.public_exponent),
            BigUint::from_bytes_be(&self.private_exponent),
        )?;
        Ok(KeyedPermutation::new(
            self.config,
            key,
            &self.symmetric_key,
            &self.tweak,
        )?)
    }

    /// Serializes the session with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes a session with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use tdperm_core::DomainBlock;

    #[test]
    fn session_file_roundtrip() {
        let config = DomainConfig {
            modulus_bits: 512,
            domain_bits: 640,
            rounds: 3,
            key_bytes: 32,
            tweak_bytes: 16,
        };
        let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
        let perm = KeyedPermutation::generate(config, &mut rng).expect("session");
        let file = SessionFile::capture(&perm);
        let bytes = file.to_bytes().expect("serialize");
        let decoded = SessionFile::from_bytes(&bytes).expect("deserialize");
        assert_eq!(decoded, file);

        let restored = decoded.restore().expect("restore");
        let block = DomainBlock::from(vec![0x61; perm.block_bytes()]);
        let encoded = perm.encode_block(&block).expect("encode");
        assert_eq!(restored.decode_block(&encoded).expect("decode"), block);
    }

    #[test]
    fn rejects_unknown_version() {
        let config = DomainConfig {
            modulus_bits: 512,
            domain_bits: 640,
            ..DomainConfig::default()
        };
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let perm = KeyedPermutation::generate(config, &mut rng).expect("session");
        let mut file = SessionFile::capture(&perm);
        file.version = 99;
        assert!(file.restore().is_err());
    }
}
