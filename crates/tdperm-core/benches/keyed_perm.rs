use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use tdperm_core::{DomainBlock, DomainConfig, Eme, KeyedPermutation, WideBlockCipher};

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("keygen");
    group.sample_size(10);
    group.bench_function("generate_2048", |b| {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        b.iter(|| KeyedPermutation::generate(DomainConfig::default(), &mut rng));
    });
    group.finish();
}

fn bench_rounds(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let perm = KeyedPermutation::generate(DomainConfig::default(), &mut rng).expect("session");
    let mut bytes = vec![0u8; perm.block_bytes()];
    rng.fill_bytes(&mut bytes);
    let block = DomainBlock::from(bytes);
    let encoded = perm.encode_block(&block).expect("encode");

    let mut group = c.benchmark_group("rounds");
    group.sample_size(10);
    group.bench_function("encode_block_20_rounds", |b| {
        b.iter(|| perm.encode_block(&block));
    });
    group.bench_function("decode_block_20_rounds", |b| {
        b.iter(|| perm.decode_block(&encoded));
    });
    group.finish();

    let eme = Eme::new(perm.symmetric_key()).expect("eme");
    c.bench_function("eme_encrypt_512_bytes", |b| {
        b.iter(|| eme.encrypt(perm.tweak(), block.as_bytes()));
    });
}

criterion_group!(benches, bench_keygen, bench_rounds);
criterion_main!(benches);
