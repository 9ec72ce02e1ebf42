//! A keyed permutation bound to one configuration and one set of keys.

use std::fmt;

use eme::Eme;
use log::debug;
use rand::{CryptoRng, RngCore};
use rsa::BigUint;

use crate::codec::{from_fixed_width, to_fixed_width, DomainBlock};
use crate::config::DomainConfig;
use crate::error::PrpError;
use crate::rng::random_bytes;
use crate::rounds::RoundComposer;
use crate::trapdoor::{TrapdoorExponent, TrapdoorKey};

/// Encode/decode over `[0, 2^B)` with fixed trapdoor key, symmetric key and tweak.
///
/// Holds only read-only state, so one instance can serve concurrent calls.
pub struct KeyedPermutation {
    config: DomainConfig,
    key: TrapdoorKey,
    symmetric_key: Vec<u8>,
    composer: RoundComposer<TrapdoorExponent, Eme>,
}

impl KeyedPermutation {
    /// Binds existing key material to `config`.
    pub fn new(
        config: DomainConfig,
        key: TrapdoorKey,
        symmetric_key: &[u8],
        tweak: &[u8],
    ) -> Result<Self, PrpError> {
        config.validate()?;
        if key.modulus_bits() != config.modulus_bits {
            return Err(PrpError::InvalidConfig(format!(
                "key has a {}-bit modulus, configuration expects {} bits",
                key.modulus_bits(),
                config.modulus_bits
            )));
        }
        if symmetric_key.len() != config.key_bytes {
            return Err(PrpError::InvalidConfig(format!(
                "symmetric key is {} bytes, configuration expects {}",
                symmetric_key.len(),
                config.key_bytes
            )));
        }
        if tweak.len() != config.tweak_bytes {
            return Err(PrpError::InvalidConfig(format!(
                "tweak is {} bytes, configuration expects {}",
                tweak.len(),
                config.tweak_bytes
            )));
        }

        let cipher = Eme::new(symmetric_key)?;
        let composer = RoundComposer::new(
            key.forward_permutation(),
            key.inverse_permutation(),
            cipher,
            tweak,
            config.domain_bits,
        );
        debug!(
            "keyed permutation ready: {}-bit modulus, {}-bit domain, {} rounds",
            key.modulus_bits(),
            config.domain_bits,
            config.rounds
        );
        Ok(Self {
            config,
            key,
            symmetric_key: symmetric_key.to_vec(),
            composer,
        })
    }

    /// Generates a trapdoor key, symmetric key and tweak from `rng`.
    ///
    /// The prime search dominates; do this once per session, not per block.
    pub fn generate<R: RngCore + CryptoRng>(
        config: DomainConfig,
        rng: &mut R,
    ) -> Result<Self, PrpError> {
        config.validate()?;
        let key = TrapdoorKey::generate(rng, config.modulus_bits)?;
        let symmetric_key = random_bytes(rng, config.key_bytes)?;
        let tweak = random_bytes(rng, config.tweak_bytes)?;
        Self::new(config, key, &symmetric_key, &tweak)
    }

    /// Session parameters.
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// The trapdoor key triple.
    pub fn trapdoor_key(&self) -> &TrapdoorKey {
        &self.key
    }

    /// The EME key.
    pub fn symmetric_key(&self) -> &[u8] {
        &self.symmetric_key
    }

    /// The EME tweak.
    pub fn tweak(&self) -> &[u8] {
        self.composer.tweak()
    }

    /// Block width `W` in bytes.
    pub fn block_bytes(&self) -> usize {
        self.composer.width()
    }

    /// Encodes one block with the configured round count.
    pub fn encode_block(&self, block: &DomainBlock) -> Result<DomainBlock, PrpError> {
        self.composer.encode(block, self.config.rounds)
    }

    /// Decodes one block with the configured round count.
    pub fn decode_block(&self, block: &DomainBlock) -> Result<DomainBlock, PrpError> {
        self.composer.decode(block, self.config.rounds)
    }

    /// Encodes an integer below `2^(8W)`.
    pub fn encode_value(&self, value: &BigUint) -> Result<BigUint, PrpError> {
        let block = to_fixed_width(value, self.block_bytes())?;
        Ok(from_fixed_width(&self.encode_block(&block)?))
    }

    /// Decodes an integer produced by [`Self::encode_value`].
    pub fn decode_value(&self, value: &BigUint) -> Result<BigUint, PrpError> {
        let block = to_fixed_width(value, self.block_bytes())?;
        Ok(from_fixed_width(&self.decode_block(&block)?))
    }
}

impl fmt::Debug for KeyedPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedPermutation")
            .field("config", &self.config)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn small_config() -> DomainConfig {
        DomainConfig {
            modulus_bits: 512,
            domain_bits: 768,
            rounds: 4,
            key_bytes: 16,
            tweak_bytes: 16,
        }
    }

    fn session(seed: u8) -> KeyedPermutation {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        KeyedPermutation::generate(small_config(), &mut rng).expect("session")
    }

    #[test]
    fn value_round_trip() {
        let perm = session(1);
        for value in [0u64, 1, 0x61, u64::MAX] {
            let value = BigUint::from(value);
            let encoded = perm.encode_value(&value).expect("encode");
            assert_eq!(perm.decode_value(&encoded).expect("decode"), value);
        }
    }

    #[test]
    fn same_seed_same_permutation() {
        let a = session(7);
        let b = session(7);
        let block = DomainBlock::from(vec![0x5a; a.block_bytes()]);
        assert_eq!(
            a.encode_block(&block).expect("encode"),
            b.encode_block(&block).expect("encode")
        );
    }

    #[test]
    fn rejects_oversized_value() {
        let perm = session(2);
        let too_big = BigUint::one() << 768usize;
        assert!(matches!(
            perm.encode_value(&too_big),
            Err(PrpError::ValueTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_mismatched_material() {
        let perm = session(3);
        let key = perm.trapdoor_key().clone();
        let config = *perm.config();
        assert!(KeyedPermutation::new(config, key.clone(), &[0u8; 32], &[0u8; 16]).is_err());
        assert!(KeyedPermutation::new(config, key.clone(), &[0u8; 16], &[0u8; 8]).is_err());
        let other_size = DomainConfig {
            modulus_bits: 384,
            ..config
        };
        assert!(matches!(
            KeyedPermutation::new(other_size, key.clone(), &[0u8; 16], &[0u8; 16]),
            Err(PrpError::InvalidConfig(_))
        ));
        assert!(KeyedPermutation::new(config, key, &[0u8; 16], &[0u8; 16]).is_ok());
    }

    #[test]
    fn rebuilt_session_matches_original() {
        let perm = session(4);
        let rebuilt = KeyedPermutation::new(
            *perm.config(),
            perm.trapdoor_key().clone(),
            perm.symmetric_key(),
            perm.tweak(),
        )
        .expect("rebuild");
        let block = DomainBlock::from(vec![0x11; perm.block_bytes()]);
        let encoded = perm.encode_block(&block).expect("encode");
        assert_eq!(rebuilt.decode_block(&encoded).expect("decode"), block);
    }

    #[test]
    fn concurrent_calls_share_one_session() {
        let perm = session(5);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0u8..4)
                .map(|i| {
                    let perm = &perm;
                    scope.spawn(move || {
                        let block = DomainBlock::from(vec![i; perm.block_bytes()]);
                        let encoded = perm.encode_block(&block).expect("encode");
                        perm.decode_block(&encoded).expect("decode") == block
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().expect("thread"));
            }
        });
    }
}
