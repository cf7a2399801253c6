use lwe_crypto::cipher;
use lwe_crypto::codec;
use lwe_crypto::field::Vector;
use lwe_crypto::keypair::keys::PrivateKey;
use lwe_crypto::keypair::params::LweParams;

use quickcheck_macros::quickcheck;
use rand::prelude::{SeedableRng, StdRng};

#[quickcheck]
fn prop_encrypt_decrypt_roundtrip(message: Vec<bool>, seed: u64) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);

    let params = LweParams::try_with(101, 12, 4).unwrap();
    let private_key = PrivateKey::try_with(params, &mut rng).unwrap();
    let public_key = private_key.get_public_key();

    let plaintext: Vector = message.iter().map(|&b| b as i64).collect();
    let ciphertext = cipher::encrypt(&plaintext, &public_key, &mut rng).unwrap();

    private_key.decrypt(&ciphertext).unwrap() == plaintext
}

#[quickcheck]
fn prop_codec_roundtrip(bytes: Vec<u8>) -> bool {
    codec::bits_to_bytes(&codec::bytes_to_bits(&bytes)).unwrap() == bytes
}
