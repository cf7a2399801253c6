use crate::cipher::{self, Ciphertext};
use crate::codec;
use crate::errors::LweCryptoError;
use crate::field::matrix_ops::{matrix_rank, matrix_vector_mul};
use crate::field::{Field, Matrix, Vector};
use crate::keypair::params::LweParams;

use rand::Rng;

use serde::{Deserialize, Serialize};

use tracing::trace;

/// The public key `(A, b)` with `b = A·s mod q` for the hidden secret `s`.
///
/// This toy variant adds no noise, so `b` determines `s` exactly whenever
/// A has full column rank — which is precisely what the attack engine
/// exploits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKey {
    pub params: LweParams,
    pub matrix_a: Matrix,
    pub vector_b: Vector,
}

/// The private key: the secret vector `s`, plus the public components it
/// was generated against. Never handed to the attack routines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateKey {
    pub params: LweParams,
    pub secret: Vector,
    matrix_a: Matrix,
    vector_b: Vector,
}

impl PrivateKey {
    /// Generates a fresh key pair: a uniform secret of length n and a
    /// random full-column-rank m×n matrix A, with `b = A·s`.
    pub fn try_with<R: Rng>(params: LweParams, rng: &mut R) -> Result<Self, LweCryptoError> {
        let field = params.field()?;
        let q = params.modulus as i64;

        let secret: Vector = (0..params.secret_length)
            .map(|_| rng.random_range(0..q))
            .collect();

        let matrix_a =
            make_full_rank_matrix(params.equation_count, params.secret_length, &field, rng)?;
        let vector_b = matrix_vector_mul(&matrix_a, &secret, &field)?;

        Ok(Self {
            params,
            secret,
            matrix_a,
            vector_b,
        })
    }

    pub fn get_public_key(&self) -> PublicKey {
        PublicKey {
            params: self.params,
            matrix_a: self.matrix_a.clone(),
            vector_b: self.vector_b.clone(),
        }
    }

    /// Decrypts a ciphertext with the true secret.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vector, LweCryptoError> {
        let field = self.params.field()?;
        cipher::decrypt(ciphertext, &self.secret, &field)
    }

    /// Decrypts a JSON ciphertext produced by
    /// [`PublicKey::encrypt_message`] back into the original string.
    pub fn decrypt_message(&self, ciphertext_json: &str) -> Result<String, LweCryptoError> {
        let ciphertext = Ciphertext::from_json(ciphertext_json)?;
        let bits = self.decrypt(&ciphertext)?;
        let bytes = codec::bits_to_bytes(&bits)?;

        String::from_utf8(bytes).map_err(|e| {
            LweCryptoError::InternalError(format!(
                "Failed to convert decrypted bytes to UTF-8: {}",
                e
            ))
        })
    }
}

impl PublicKey {
    /// Encrypts a sequence of bits. Convenience front for
    /// [`cipher::encrypt`].
    pub fn encrypt<R: Rng>(
        &self,
        plaintext: &Vector,
        rng: &mut R,
    ) -> Result<Ciphertext, LweCryptoError> {
        cipher::encrypt(plaintext, self, rng)
    }

    /// Encrypts a UTF-8 message bit-by-bit and serializes the ciphertext to
    /// a JSON string.
    pub fn encrypt_message<R: Rng>(
        &self,
        message: &str,
        rng: &mut R,
    ) -> Result<String, LweCryptoError> {
        let bits = codec::bytes_to_bits(message.as_bytes());
        let ciphertext = cipher::encrypt(&bits, self, rng)?;
        ciphertext.to_json()
    }
}

/// Randomly generates an m×n matrix over Z_q with full column rank, so that
/// `A·s` pins down `s` uniquely.
///
/// # Errors
///
/// Returns `LweCryptoError::InternalError` if no full-rank matrix is found
/// within the attempt budget (only plausible for tiny moduli and shapes).
pub fn make_full_rank_matrix<R: Rng>(
    rows: usize,
    cols: usize,
    field: &Field,
    rng: &mut R,
) -> Result<Matrix, LweCryptoError> {
    let q = field.modulus() as i64;
    let mut attempts = 0;

    loop {
        attempts += 1;
        if attempts > 10_000 {
            return Err(LweCryptoError::InternalError(
                "Could not generate a full-column-rank matrix A".into(),
            ));
        }

        let candidate: Matrix = (0..rows)
            .map(|_| (0..cols).map(|_| rng.random_range(0..q)).collect())
            .collect();

        if matrix_rank(&candidate, field)? == cols {
            trace!(attempts, rows, cols, "generated full-column-rank matrix");
            return Ok(candidate);
        }
    }
}
