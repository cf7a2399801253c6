//! Byte <-> bit conversions for the message-level convenience API.

use crate::errors::LweCryptoError;
use crate::field::Vector;

/// Expands bytes into a bit vector, most significant bit first.
///
/// # Example
///
/// ```
/// # use lwe_crypto::codec::bytes_to_bits;
/// assert_eq!(bytes_to_bits(&[0b1010_0001]), vec![1, 0, 1, 0, 0, 0, 0, 1]);
/// ```
pub fn bytes_to_bits(bytes: &[u8]) -> Vector {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push(((byte >> shift) & 1) as i64);
        }
    }
    bits
}

/// Packs a bit vector back into bytes, most significant bit first.
///
/// # Errors
///
/// Returns `LweCryptoError::DimensionMismatch` if the bit count is not a
/// multiple of 8, and `LweCryptoError::InvalidParameters` if any element is
/// not 0 or 1.
///
/// # Example
///
/// ```
/// # use lwe_crypto::codec::bits_to_bytes;
/// assert_eq!(bits_to_bytes(&[0, 1, 0, 0, 0, 0, 0, 1]).unwrap(), vec![0x41]);
/// assert!(bits_to_bytes(&[1, 0, 1]).is_err());
/// ```
pub fn bits_to_bytes(bits: &[i64]) -> Result<Vec<u8>, LweCryptoError> {
    if bits.len() % 8 != 0 {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Bit count {} is not a multiple of 8",
            bits.len()
        )));
    }

    bits.chunks_exact(8)
        .map(|chunk| {
            let mut byte = 0u8;
            for &bit in chunk {
                if bit != 0 && bit != 1 {
                    return Err(LweCryptoError::InvalidParameters(format!(
                        "Bit value {} is outside {{0, 1}}",
                        bit
                    )));
                }
                byte = (byte << 1) | bit as u8;
            }
            Ok(byte)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let bytes = vec![0x00, 0xff, 0x41, 0x7f, 0x80];
        let bits = bytes_to_bits(&bytes);
        assert_eq!(bits.len(), bytes.len() * 8);
        assert_eq!(bits_to_bytes(&bits).unwrap(), bytes);
    }

    #[test]
    fn test_empty() {
        assert!(bytes_to_bits(&[]).is_empty());
        assert_eq!(bits_to_bytes(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_rejects_partial_byte() {
        assert!(bits_to_bytes(&[1, 0, 1, 1]).is_err());
    }

    #[test]
    fn test_rejects_non_bit_values() {
        let bits = vec![0, 1, 0, 1, 0, 1, 0, 2];
        match bits_to_bytes(&bits) {
            Err(LweCryptoError::InvalidParameters(_)) => {}
            other => panic!("expected InvalidParameters, got {:?}", other),
        }
    }
}
