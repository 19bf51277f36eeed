use criterion::{criterion_group, BatchSize, Criterion};
use rand::{thread_rng, Rng};
use signet_cryptography::{secp256k1::PrivateKey, Signer as _};
use std::hint::black_box;

fn benchmark_shared_secret(c: &mut Criterion) {
    let mut msg = [0u8; 32];
    thread_rng().fill(&mut msg);
    c.bench_function(
        &format!("{}/msg_len={}", module_path!(), msg.len()),
        |b| {
            b.iter_batched(
                || {
                    let ours = PrivateKey::from_rng(&mut thread_rng()).unwrap();
                    let theirs = PrivateKey::from_rng(&mut thread_rng()).unwrap();
                    (ours, theirs.public_key())
                },
                |(ours, theirs)| {
                    black_box(ours.shared_secret(&theirs, &msg).unwrap());
                },
                BatchSize::SmallInput,
            );
        },
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_shared_secret
}
