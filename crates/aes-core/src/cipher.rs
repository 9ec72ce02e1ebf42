//! AES key schedule and block encryption/decryption.

use crate::block::{Block, BLOCK_BYTES};
use crate::key::{AesKey, RoundKeys, MAX_ROUND_KEYS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::sbox;

const RCON: [u8; 10] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128- or 256-bit key into `Nr + 1` round keys.
pub fn expand_key(key: &AesKey) -> RoundKeys {
    let key_bytes = key.as_bytes();
    let nk = key_bytes.len() / 4;
    let rounds = key.rounds();
    let total_words = 4 * (rounds + 1);

    let mut w = [0u32; 4 * MAX_ROUND_KEYS];
    for (slot, chunk) in w.iter_mut().zip(key_bytes.chunks_exact(4)) {
        *slot = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    let mut round_keys = [[0u8; BLOCK_BYTES]; MAX_ROUND_KEYS];
    for (round_key, words) in round_keys.iter_mut().zip(w[..total_words].chunks_exact(4)) {
        for (dst, word) in round_key.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
    }

    RoundKeys::new(round_keys, rounds)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));
    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, round_keys.get(0));

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    const FIPS_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const FIPS_CIPHER_128: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];
    const FIPS_CIPHER_256: [u8; 16] = [
        0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60,
        0x89,
    ];

    fn counting_key<const N: usize>() -> [u8; N] {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn aes128_matches_fips_vector() {
        let rks = expand_key(&AesKey::from(counting_key::<16>()));
        assert_eq!(rks.rounds(), 10);
        assert_eq!(encrypt_block(&FIPS_PLAIN, &rks), FIPS_CIPHER_128);
        assert_eq!(decrypt_block(&FIPS_CIPHER_128, &rks), FIPS_PLAIN);
    }

    #[test]
    fn aes256_matches_fips_vector() {
        let rks = expand_key(&AesKey::from(counting_key::<32>()));
        assert_eq!(rks.rounds(), 14);
        assert_eq!(encrypt_block(&FIPS_PLAIN, &rks), FIPS_CIPHER_256);
        assert_eq!(decrypt_block(&FIPS_CIPHER_256, &rks), FIPS_PLAIN);
    }

    #[test]
    fn aes128_schedule_last_round_key() {
        // FIPS-197 A.1: w[40..44] for key 2b7e1516 28aed2a6 abf71588 09cf4f3c.
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let rks = expand_key(&AesKey::from(key));
        assert_eq!(
            rks.get(10),
            &[
                0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63,
                0x0c, 0xa6
            ]
        );
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let mut key_bytes = [0u8; 32];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            for key in [
                AesKey::from_slice(&key_bytes[..16]),
                AesKey::from_slice(&key_bytes),
            ]
            .into_iter()
            .flatten()
            {
                let rks = expand_key(&key);
                let ct = encrypt_block(&block, &rks);
                assert_eq!(decrypt_block(&ct, &rks), block);
            }
        }
    }
}
