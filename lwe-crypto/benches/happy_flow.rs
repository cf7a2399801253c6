use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lwe_crypto::attack;
use lwe_crypto::cipher;
use lwe_crypto::keypair::keys::PrivateKey;
use lwe_crypto::keypair::params::LweParams;

use rand::prelude::{SeedableRng, StdRng};

fn bench_happy_flow(c: &mut Criterion) {
    // 1) one‐time setup
    let mut rng = StdRng::seed_from_u64(12345);
    let params = LweParams::try_with(251, 10, 4).expect("build params");
    let private_key = PrivateKey::try_with(params, &mut rng).expect("make private key");
    let public_key = private_key.get_public_key();

    // the same plaintext every iteration
    let plaintext = vec![1, 0, 1, 1, 0, 1, 0, 0];
    let ciphertext = cipher::encrypt(&plaintext, &public_key, &mut rng).expect("encrypt");

    c.bench_function("encrypt", |b| {
        b.iter(|| {
            let mut encrypt_rng = StdRng::seed_from_u64(777);
            let cipher = cipher::encrypt(black_box(&plaintext), &public_key, &mut encrypt_rng)
                .expect("encrypt");
            black_box(cipher);
        })
    });

    c.bench_function("vote_search", |b| {
        b.iter(|| {
            let mut search_rng = StdRng::seed_from_u64(67890);
            let recovered =
                attack::vote_search(black_box(&ciphertext), &public_key, 4, &mut search_rng)
                    .expect("vote search");
            black_box(recovered);
        })
    });
}

criterion_group!(benches, bench_happy_flow);
criterion_main!(benches);
