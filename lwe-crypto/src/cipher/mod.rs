//! # Cipher Transform
//!
//! Bit-wise encryption against a public key `(A, b)` and decryption with a
//! candidate secret. Each plaintext bit becomes one `(a', b')` pair:
//! `a' = r·A` and `b' = r·b + bit·⌊q/2⌋` for a fresh random binary mask `r`.

use crate::errors::LweCryptoError;
use crate::field::matrix_ops::{dot_product, vector_matrix_mul};
use crate::field::{Field, Vector};
use crate::keypair::keys::PublicKey;

use rand::Rng;

use serde::{Deserialize, Serialize};

/// One encrypted bit: the masked row combination `a'` and the scalar `b'`.
pub type CipherBlock = (Vector, i64);

/// An ordered sequence of encrypted bits. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub blocks: Vec<CipherBlock>,
}

impl Ciphertext {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serializes the ciphertext into a JSON string.
    pub fn to_json(&self) -> Result<String, LweCryptoError> {
        Ok(serde_json::to_string(&self.blocks)?)
    }

    /// Deserializes a ciphertext from its JSON string form.
    pub fn from_json(data: &str) -> Result<Self, LweCryptoError> {
        let blocks: Vec<CipherBlock> = serde_json::from_str(data)?;
        Ok(Self { blocks })
    }
}

/// Encrypts a sequence of bits under the public key.
///
/// For each bit a fresh uniformly random binary vector `r` of length m is
/// drawn, consuming m random bits from `rng` per plaintext bit.
///
/// # Errors
///
/// Returns `LweCryptoError::InvalidParameters` if any plaintext element is
/// not 0 or 1, and `LweCryptoError::DimensionMismatch` if the public key's
/// matrix and vector disagree in shape.
pub fn encrypt<R: Rng>(
    plaintext: &Vector,
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<Ciphertext, LweCryptoError> {
    let field = public_key.params.field()?;
    let matrix_a = &public_key.matrix_a;
    let vector_b = &public_key.vector_b;

    let m = matrix_a.len();
    if vector_b.len() != m {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Public key has {} equations but {} right-hand sides",
            m,
            vector_b.len()
        )));
    }

    let mut blocks = Vec::with_capacity(plaintext.len());
    for (index, &bit) in plaintext.iter().enumerate() {
        if bit != 0 && bit != 1 {
            return Err(LweCryptoError::InvalidParameters(format!(
                "Plaintext element {} is {}, expected a bit (0 or 1)",
                index, bit
            )));
        }

        let mask: Vector = (0..m).map(|_| rng.random_range(0..2i64)).collect();

        let a_prime = vector_matrix_mul(&mask, matrix_a, &field)?;
        let masked_b = dot_product(&mask, vector_b, &field)?;
        let b_prime = field.add(masked_b, field.mul(bit, field.half()));

        blocks.push((a_prime, b_prime));
    }

    Ok(Ciphertext { blocks })
}

/// Decrypts each `(a', b')` pair with the given key.
///
/// Computes `m' = (b' - a'·key) mod q` and decodes the bit with
/// [`decode_bit`]. A key longer than `a'` is truncated to `a'`'s length;
/// this alignment rule exists for candidate keys recovered from subsampled
/// systems. A key shorter than `a'` is a `DimensionMismatch`.
pub fn decrypt(
    ciphertext: &Ciphertext,
    key: &Vector,
    field: &Field,
) -> Result<Vector, LweCryptoError> {
    let mut plaintext = Vec::with_capacity(ciphertext.len());

    for (index, (a_prime, b_prime)) in ciphertext.blocks.iter().enumerate() {
        if key.len() < a_prime.len() {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Key length {} is shorter than ciphertext vector {} (length {})",
                key.len(),
                index,
                a_prime.len()
            )));
        }
        let aligned_key = &key[..a_prime.len()];

        let v = dot_product(a_prime, aligned_key, field)?;
        let m_prime = field.sub(*b_prime, v);

        plaintext.push(decode_bit(m_prime, field));
    }

    Ok(plaintext)
}

/// Decision rule for a decrypted residue `m'` in `[0, q)`.
///
/// With `d = |m' - ⌊q/2⌋|`, the bit is 1 iff `d < m'` and `d < q - m'`.
/// The comparisons are deliberately strict and the rule is asymmetric:
/// `m' = 0` always decodes to 0, and a residue equidistant from `⌊q/2⌋`
/// and `q` decodes to 0. This reproduces the reference semantics exactly.
pub fn decode_bit(m_prime: i64, field: &Field) -> i64 {
    let q = field.modulus() as i64;
    let d = (m_prime - field.half()).abs();

    if d < m_prime && d < q - m_prime { 1 } else { 0 }
}
