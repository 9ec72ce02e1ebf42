//! EME transform: ECB layer, mixing layer, ECB layer.

use aes_core::{
    decrypt_block, encrypt_block, expand_key, xor_in_place, AesKey, Block, RoundKeys, BLOCK_BYTES,
};

use crate::error::EmeError;
use crate::WideBlockCipher;

/// Tweak length in bytes.
pub const TWEAK_BYTES: usize = BLOCK_BYTES;

/// Largest input EME accepts, in 16-byte blocks.
pub const MAX_BLOCKS: usize = 128;

/// Which way the underlying block cipher runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Forward transform.
    Encrypt,
    /// Inverse transform.
    Decrypt,
}

/// EME over AES-128 or AES-256, selected by key length.
#[derive(Clone, Debug)]
pub struct Eme {
    round_keys: RoundKeys,
}

impl Eme {
    /// Expands `key` (16 or 32 bytes) into a ready-to-use cipher.
    pub fn new(key: &[u8]) -> Result<Self, EmeError> {
        let key = AesKey::from_slice(key).ok_or(EmeError::InvalidKeyLength { len: key.len() })?;
        Ok(Self {
            round_keys: expand_key(&key),
        })
    }

    /// Runs the EME transform over `input` in the requested direction.
    pub fn transform(
        &self,
        tweak: &[u8],
        input: &[u8],
        direction: Direction,
    ) -> Result<Vec<u8>, EmeError> {
        let tweak: Block = tweak
            .try_into()
            .map_err(|_| EmeError::InvalidTweakLength { len: tweak.len() })?;
        let blocks = block_count(input.len())?;
        let masks = self.mask_table(blocks);

        // ECB pass over the whitened input.
        let mut state: Vec<Block> = input
            .chunks_exact(BLOCK_BYTES)
            .zip(&masks)
            .map(|(chunk, mask)| {
                let mut block = to_block(chunk);
                xor_in_place(&mut block, mask);
                self.cipher(&block, direction)
            })
            .collect();

        // Mixing layer.
        let mut mp = tweak;
        for block in &state {
            xor_in_place(&mut mp, block);
        }
        let mc = self.cipher(&mp, direction);
        let mut mix = mp;
        xor_in_place(&mut mix, &mc);
        for block in state.iter_mut().skip(1) {
            mix = double(&mix);
            xor_in_place(block, &mix);
        }
        let mut head = mc;
        xor_in_place(&mut head, &tweak);
        for block in state.iter().skip(1) {
            xor_in_place(&mut head, block);
        }
        state[0] = head;

        // Second ECB pass and output whitening.
        for (block, mask) in state.iter_mut().zip(&masks) {
            *block = self.cipher(block, direction);
            xor_in_place(block, mask);
        }

        Ok(state.concat())
    }

    fn cipher(&self, block: &Block, direction: Direction) -> Block {
        match direction {
            Direction::Encrypt => encrypt_block(block, &self.round_keys),
            Direction::Decrypt => decrypt_block(block, &self.round_keys),
        }
    }

    /// `L_j = 2^(j+1) * E_K(0)`; always computed with the forward cipher.
    fn mask_table(&self, blocks: usize) -> Vec<Block> {
        let mut current = encrypt_block(&[0u8; BLOCK_BYTES], &self.round_keys);
        (0..blocks)
            .map(|_| {
                current = double(&current);
                current
            })
            .collect()
    }
}

impl WideBlockCipher for Eme {
    fn encrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError> {
        self.transform(tweak, input, Direction::Encrypt)
    }

    fn decrypt(&self, tweak: &[u8], input: &[u8]) -> Result<Vec<u8>, EmeError> {
        self.transform(tweak, input, Direction::Decrypt)
    }
}

fn block_count(len: usize) -> Result<usize, EmeError> {
    let blocks = len / BLOCK_BYTES;
    if len % BLOCK_BYTES != 0 || blocks == 0 || blocks > MAX_BLOCKS {
        return Err(EmeError::InvalidLength {
            len,
            max_blocks: MAX_BLOCKS,
        });
    }
    Ok(blocks)
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_BYTES];
    block.copy_from_slice(chunk);
    block
}

/// Doubling in GF(2^128), little-endian byte order, reduction constant 0x87.
fn double(input: &Block) -> Block {
    let mut out = [0u8; BLOCK_BYTES];
    let mut carry = 0u8;
    for (dst, &src) in out.iter_mut().zip(input.iter()) {
        *dst = (src << 1) | carry;
        carry = src >> 7;
    }
    if carry != 0 {
        out[0] ^= 0x87;
    }
    out
}
