// Vault benchmarks: seed generation, key derivation, HMAC signing and
// record verification on both key widths.

use criterion::{criterion_group, criterion_main, Criterion};

use energy_protocol::transaction::TransactionBuilder;
use energy_protocol::vault::{derive_keys, generate_seed, verify_transaction, Vault};

fn bench_seed_generation(c: &mut Criterion) {
    c.bench_function("vault/generate_seed", |b| {
        b.iter(|| generate_seed().unwrap());
    });
}

fn bench_key_derivation(c: &mut Criterion) {
    let seed = generate_seed().unwrap();
    c.bench_function("vault/derive_keys", |b| {
        b.iter(|| derive_keys(&seed));
    });
}

fn bench_sign_and_verify(c: &mut Criterion) {
    let vault = Vault::from_seed("bench seed");
    let tx = TransactionBuilder::new()
        .amount(1_000.0)
        .sender("alice")
        .receiver("bob")
        .purpose("invoice 2024-118")
        .timestamp("2024-01-01T10:00:00Z")
        .build();

    for network in ["XRP", "HBAR"] {
        c.bench_function(&format!("vault/sign/{network}"), |b| {
            b.iter(|| vault.sign(&tx, network).unwrap());
        });

        let signed = vault.sign(&tx, network).unwrap();
        c.bench_function(&format!("vault/verify/{network}"), |b| {
            b.iter(|| verify_transaction(&signed));
        });
    }
}

criterion_group!(benches, bench_seed_generation, bench_key_derivation, bench_sign_and_verify);
criterion_main!(benches);
