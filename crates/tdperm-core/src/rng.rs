//! Secure random source for keys and tweaks.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::PrpError;

/// OS-backed RNG used when the caller does not supply one.
pub type SecureRng = OsRng;

/// Returns the OS RNG.
pub fn secure_rng() -> SecureRng {
    OsRng
}

/// Draws `len` random bytes, reporting exhaustion instead of panicking.
pub fn random_bytes<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    len: usize,
) -> Result<Vec<u8>, PrpError> {
    let mut out = vec![0u8; len];
    rng.try_fill_bytes(&mut out)
        .map_err(PrpError::EntropyUnavailable)?;
    Ok(out)
}
