//! AES S-box and its inverse, generated from the GF(2^8) definition.

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = invert_table(&SBOX);

// Walks the multiplicative group with generator 3: `p` steps forward and `q`
// steps backward, so `q` is always the inverse of `p`.
const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut p: u8 = 1;
    let mut q: u8 = 1;
    loop {
        p = p ^ (p << 1) ^ (if p & 0x80 != 0 { 0x1b } else { 0 });

        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        let affine =
            q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4);
        table[p as usize] = affine ^ 0x63;

        if p == 1 {
            break;
        }
    }
    table[0] = 0x63;
    table
}

const fn invert_table(table: &[u8; 256]) -> [u8; 256] {
    let mut inverse = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

/// Forward S-box lookup.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Inverse S-box lookup.
#[inline]
pub fn inv_sbox(byte: u8) -> u8 {
    INV_SBOX[byte as usize]
}
