//! Command-line driver for `tdperm`.

#![forbid(unsafe_code)]

mod store;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tdperm_core::{DomainBlock, DomainConfig, KeyedPermutation};

use crate::store::SessionFile;

/// Keyed permutation over a wide domain built from RSA and EME rounds.
#[derive(Parser)]
#[command(
    name = "tdperm",
    version,
    author,
    about = "Trapdoor keyed permutation CLI (RSA domain extension + EME)"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a session (modulus, exponents, EME key and tweak).
    Keygen {
        /// Output path for the serialized session.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Optional RNG seed for reproducible generation.
        #[arg(long)]
        seed: Option<u64>,
        /// Modulus size in bits.
        #[arg(long, default_value_t = DomainConfig::default().modulus_bits)]
        modulus_bits: usize,
        /// Extended domain width in bits (multiple of 128).
        #[arg(long, default_value_t = DomainConfig::default().domain_bits)]
        domain_bits: usize,
        /// Rounds per encode/decode call.
        #[arg(long, default_value_t = DomainConfig::default().rounds)]
        rounds: usize,
    },
    /// Encode blocks from a file (length must be a multiple of the block width).
    Encode {
        /// Path to the serialized session.
        #[arg(long, value_name = "FILE")]
        session: PathBuf,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decode blocks produced by `encode`.
    Decode {
        /// Path to the serialized session.
        #[arg(long, value_name = "FILE")]
        session: PathBuf,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Run a local demo: fresh session, encode "abc", decode it back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Rounds per encode/decode call.
        #[arg(long, default_value_t = DomainConfig::default().rounds)]
        rounds: usize,
    },
}

#[derive(Clone, Copy)]
enum Mode {
    Encode,
    Decode,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    match cli.command {
        Commands::Keygen {
            out,
            seed,
            modulus_bits,
            domain_bits,
            rounds,
        } => {
            let config = DomainConfig {
                modulus_bits,
                domain_bits,
                rounds,
                ..DomainConfig::default()
            };
            cmd_keygen(&out, seed, config)
        }
        Commands::Encode {
            session,
            input,
            output,
        } => cmd_apply(&session, &input, &output, Mode::Encode),
        Commands::Decode {
            session,
            input,
            output,
        } => cmd_apply(&session, &input, &output, Mode::Decode),
        Commands::Demo { seed, rounds } => cmd_demo(seed, rounds),
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default)).init();
}

fn cmd_keygen(out: &Path, seed: Option<u64>, config: DomainConfig) -> Result<()> {
    config.validate().context("session parameters")?;
    let mut rng = seeded_rng(seed);
    let perm = KeyedPermutation::generate(config, &mut rng).context("generate session")?;
    let bytes = SessionFile::capture(&perm)
        .to_bytes()
        .context("serialize session")?;
    fs::write(out, bytes).with_context(|| format!("write {}", out.display()))?;
    debug!("wrote session to {}", out.display());
    Ok(())
}

fn cmd_apply(session_path: &Path, input_path: &Path, output_path: &Path, mode: Mode) -> Result<()> {
    let perm = load_session(session_path)?;
    let width = perm.block_bytes();
    let data = fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    if data.is_empty() || data.len() % width != 0 {
        bail!("input length must be a non-zero multiple of {width} bytes");
    }
    let mut out = Vec::with_capacity(data.len());
    for (index, chunk) in data.chunks(width).enumerate() {
        let block = DomainBlock::from(chunk.to_vec());
        let result = match mode {
            Mode::Encode => perm.encode_block(&block),
            Mode::Decode => perm.decode_block(&block),
        }
        .with_context(|| format!("block {index}"))?;
        out.extend_from_slice(result.as_bytes());
    }
    fs::write(output_path, out).with_context(|| format!("write {}", output_path.display()))?;
    Ok(())
}

fn cmd_demo(seed: Option<u64>, rounds: usize) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let config = DomainConfig::default().with_rounds(rounds);
    let perm = KeyedPermutation::generate(config, &mut rng).context("generate session")?;

    let mut bytes = vec![0u8; perm.block_bytes()];
    bytes[..3].copy_from_slice(b"abc");
    let block = DomainBlock::from(bytes);

    let encoded = perm.encode_block(&block).context("encode")?;
    let decoded = perm.decode_block(&encoded).context("decode")?;

    println!("modulus bits: {}", perm.trapdoor_key().modulus_bits());
    println!("block bytes: {}", perm.block_bytes());
    println!("rounds: {}", perm.config().rounds);
    println!("plaintext: {}", hex::encode(block.as_bytes()));
    println!("ciphertext: {}", hex::encode(encoded.as_bytes()));
    println!("decrypted: {}", hex::encode(decoded.as_bytes()));
    if decoded != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn load_session(path: &Path) -> Result<KeyedPermutation> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file = SessionFile::from_bytes(&bytes).context("deserialize session")?;
    file.restore().context("restore session")
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}
