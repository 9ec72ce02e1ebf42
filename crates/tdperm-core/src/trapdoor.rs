//! RSA modulus and exponent pair used as the trapdoor permutation.

use std::fmt;

use log::debug;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};

use crate::error::PrpError;
use crate::extend::BasePermutation;

/// Computes `x^exponent mod modulus` for `x < modulus`.
pub fn forward(x: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(x < modulus);
    x.modpow(exponent, modulus)
}

/// The modulus triple `(N, e, d)`.
#[derive(Clone, PartialEq, Eq)]
pub struct TrapdoorKey {
    modulus: BigUint,
    public_exponent: BigUint,
    private_exponent: BigUint,
}

impl TrapdoorKey {
    /// Generates a fresh `bits`-bit modulus with its exponent pair.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, bits: usize) -> Result<Self, PrpError> {
        debug!("generating {bits}-bit trapdoor modulus");
        let private = RsaPrivateKey::new(rng, bits).map_err(PrpError::KeyGenerationFailure)?;
        let key = Self {
            modulus: private.n().clone(),
            public_exponent: private.e().clone(),
            private_exponent: private.d().clone(),
        };
        debug!(
            "trapdoor modulus ready ({} bits, e = {})",
            key.modulus_bits(),
            key.public_exponent
        );
        Ok(key)
    }

    /// Rebuilds a key from stored components, checking that `e` and `d` invert each other.
    pub fn from_components(
        modulus: BigUint,
        public_exponent: BigUint,
        private_exponent: BigUint,
    ) -> Result<Self, PrpError> {
        let three = BigUint::from(3u32);
        if modulus <= three {
            return Err(PrpError::InvalidConfig(format!(
                "modulus {modulus} is too small"
            )));
        }
        if public_exponent.is_zero() || private_exponent.is_zero() {
            return Err(PrpError::MismatchedExponents);
        }
        let key = Self {
            modulus,
            public_exponent,
            private_exponent,
        };
        let probes = [
            BigUint::from(2u32),
            three,
            &key.modulus - BigUint::from(2u32),
        ];
        for probe in &probes {
            let there = forward(probe, &key.private_exponent, &key.modulus);
            if forward(&there, &key.public_exponent, &key.modulus) != *probe {
                return Err(PrpError::MismatchedExponents);
            }
        }
        Ok(key)
    }

    /// The modulus `N`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Bit length of `N`.
    pub fn modulus_bits(&self) -> usize {
        self.modulus.bits()
    }

    /// The public exponent `e`.
    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    /// The private exponent `d`.
    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    /// Exponentiation by `d`: the trapdoor step of the encode direction.
    pub fn forward_permutation(&self) -> TrapdoorExponent {
        TrapdoorExponent::new(self.modulus.clone(), self.private_exponent.clone())
    }

    /// Exponentiation by `e`: the trapdoor step of the decode direction.
    pub fn inverse_permutation(&self) -> TrapdoorExponent {
        TrapdoorExponent::new(self.modulus.clone(), self.public_exponent.clone())
    }
}

impl fmt::Debug for TrapdoorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrapdoorKey")
            .field("modulus_bits", &self.modulus_bits())
            .field("public_exponent", &self.public_exponent)
            .finish_non_exhaustive()
    }
}

/// `x -> x^exponent mod N` as a permutation of `[0, N)`.
#[derive(Clone)]
pub struct TrapdoorExponent {
    modulus: BigUint,
    exponent: BigUint,
}

impl TrapdoorExponent {
    /// Pairs a modulus with one exponent of a validated [`TrapdoorKey`].
    pub(crate) fn new(modulus: BigUint, exponent: BigUint) -> Self {
        Self { modulus, exponent }
    }
}

impl BasePermutation for TrapdoorExponent {
    fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    fn permute(&self, residue: &BigUint) -> BigUint {
        forward(residue, &self.exponent, &self.modulus)
    }
}

impl fmt::Debug for TrapdoorExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrapdoorExponent")
            .field("modulus_bits", &self.modulus.bits())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extend::DomainExtender;
    use num_traits::One;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    // Textbook key: N = 61 * 53, e = 17, d = 2753.
    fn textbook() -> TrapdoorKey {
        TrapdoorKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
        )
        .expect("textbook key")
    }

    #[test]
    fn textbook_exponents_invert() {
        let key = textbook();
        let encode = key.forward_permutation();
        let decode = key.inverse_permutation();
        for x in 0u32..3233 {
            let x = BigUint::from(x);
            assert_eq!(decode.permute(&encode.permute(&x)), x);
        }
    }

    #[test]
    fn extended_trapdoor_is_bijective() {
        // 4096 = 3233 + 863: one permuted row and a pass-through tail.
        let key = textbook();
        let ext = DomainExtender::new(key.forward_permutation(), 12);
        let inv = DomainExtender::new(key.inverse_permutation(), 12);
        let mut seen = HashSet::new();
        for m in 0u32..4096 {
            let value = BigUint::from(m);
            let out = ext.apply(&value);
            assert!(out < BigUint::from(4096u32));
            assert_eq!(inv.apply(&out), value);
            assert!(seen.insert(out));
        }
    }

    #[test]
    fn rejects_mismatched_exponents() {
        let result = TrapdoorKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2751u32),
        );
        assert!(matches!(result, Err(PrpError::MismatchedExponents)));
    }

    #[test]
    fn rejects_degenerate_modulus() {
        for modulus in [0u32, 1, 3] {
            let result = TrapdoorKey::from_components(
                BigUint::from(modulus),
                BigUint::one(),
                BigUint::one(),
            );
            assert!(matches!(result, Err(PrpError::InvalidConfig(_))));
        }
    }

    #[test]
    fn exponent_permutations_share_key_modulus() {
        let key = textbook();
        assert_eq!(key.forward_permutation().modulus(), key.modulus());
        assert_eq!(key.inverse_permutation().modulus(), key.modulus());
    }

    #[test]
    fn generated_key_has_requested_size() {
        let mut rng = ChaCha20Rng::from_seed([21u8; 32]);
        let key = TrapdoorKey::generate(&mut rng, 512).expect("keygen");
        assert_eq!(key.modulus_bits(), 512);
        assert_eq!(key.public_exponent(), &BigUint::from(65537u32));
        let rebuilt = TrapdoorKey::from_components(
            key.modulus().clone(),
            key.public_exponent().clone(),
            key.private_exponent().clone(),
        )
        .expect("rebuild");
        assert_eq!(rebuilt, key);
    }

    #[test]
    fn debug_output_hides_private_exponent() {
        let rendered = format!("{:?}", textbook());
        assert!(rendered.contains("modulus_bits"));
        assert!(!rendered.contains("2753"));
    }
}
