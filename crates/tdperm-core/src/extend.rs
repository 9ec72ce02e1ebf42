//! Domain extension from `[0, N)` to `[0, 2^B)`.
//!
//! The extended domain is cut into rows of width `N`. Every row that lies
//! entirely below `2^B` is permuted internally by the base permutation; the
//! final partial row `[floor(2^B / N) * N, 2^B)` passes through unchanged.
//! Rows never exchange elements, so the map is a bijection for any `B` with
//! `2^B >= N`, and extending the inverse base permutation inverts it exactly.

use num_traits::One;
use rsa::BigUint;

/// A permutation of `[0, modulus)`.
pub trait BasePermutation {
    /// Size of the permuted range; must be non-zero.
    fn modulus(&self) -> &BigUint;

    /// Maps `residue < modulus` to another residue.
    fn permute(&self, residue: &BigUint) -> BigUint;
}

impl<P: BasePermutation + ?Sized> BasePermutation for &P {
    fn modulus(&self) -> &BigUint {
        (**self).modulus()
    }

    fn permute(&self, residue: &BigUint) -> BigUint {
        (**self).permute(residue)
    }
}

/// A base permutation lifted to `[0, 2^domain_bits)`.
#[derive(Clone, Debug)]
pub struct DomainExtender<P> {
    base: P,
    bound: BigUint,
    domain_bits: usize,
}

impl<P: BasePermutation> DomainExtender<P> {
    /// Wraps `base` for a domain of `domain_bits` bits.
    pub fn new(base: P, domain_bits: usize) -> Self {
        Self {
            base,
            bound: BigUint::one() << domain_bits,
            domain_bits,
        }
    }

    /// The wrapped base permutation.
    pub fn base(&self) -> &P {
        &self.base
    }

    /// Width of the extended domain in bits.
    pub fn domain_bits(&self) -> usize {
        self.domain_bits
    }

    /// First value of the pass-through region, `floor(2^B / N) * N`.
    pub fn passthrough_start(&self) -> BigUint {
        let modulus = self.base.modulus();
        (&self.bound / modulus) * modulus
    }

    /// Applies the extended permutation to `value`.
    ///
    /// Values at or above `2^B` are returned untouched, which keeps the map a
    /// bijection on any wider block the value happens to live in.
    pub fn apply(&self, value: &BigUint) -> BigUint {
        let modulus = self.base.modulus();
        let row = value / modulus;
        let row_end = (&row + BigUint::one()) * modulus;
        if row_end > self.bound {
            return value.clone();
        }
        let residue = value % modulus;
        row * modulus + self.base.permute(&residue)
    }
}
