//! AES round transformations over the column-major state.

use crate::block::{xor_in_place, Block};
use crate::sbox::{inv_sbox, sbox};

// Source index for each output byte of ShiftRows: row `r` rotates left by `r`.
const SHIFT_ROWS: [usize; 16] = [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11];
const INV_SHIFT_ROWS: [usize; 16] = [0, 13, 10, 7, 4, 1, 14, 11, 8, 5, 2, 15, 12, 9, 6, 3];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    state.iter_mut().for_each(|byte| *byte = sbox(*byte));
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    state.iter_mut().for_each(|byte| *byte = inv_sbox(*byte));
}

fn permute(state: &mut Block, sources: &[usize; 16]) {
    let snapshot = *state;
    for (dst, &src) in state.iter_mut().zip(sources.iter()) {
        *dst = snapshot[src];
    }
}

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut Block) {
    permute(state, &SHIFT_ROWS);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    permute(state, &INV_SHIFT_ROWS);
}

/// Multiplication in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    product
}

fn mix_with(state: &mut Block, coeffs: [u8; 4]) {
    for column in state.chunks_exact_mut(4) {
        let a = [column[0], column[1], column[2], column[3]];
        for (row, out) in column.iter_mut().enumerate() {
            *out = (0..4).fold(0u8, |acc, k| acc ^ gmul(a[(row + k) % 4], coeffs[k]));
        }
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, [0x02, 0x03, 0x01, 0x01]);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, [0x0e, 0x0b, 0x0d, 0x09]);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
