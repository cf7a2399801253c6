//! Implementation of field ops using modular arithmetic.

use crate::errors::LweCryptoError;

use super::extended_gcd;

use serde::{Deserialize, Serialize};

/// Represents the finite field Z_q using modular arithmetic.
///
/// The modulus is expected to be prime; `Field` itself only enforces
/// `q > 2` (the bit-decoding midpoint rule needs a meaningful `q / 2`).
/// With a composite modulus the arithmetic stays well-defined but most
/// elements have no inverse, which callers observe as `NoInverse` /
/// `LinearDependence` results.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub modulus: u64,
}

impl Field {
    /// Create a new Field with the given modulus.
    ///
    /// The modulus must be greater than 2.
    pub fn try_with(modulus: u64) -> Result<Self, LweCryptoError> {
        if modulus <= 2 {
            return Err(LweCryptoError::InvalidModulus(format!(
                "Modulus must be greater than 2, got {}",
                modulus
            )));
        }

        Ok(Field { modulus })
    }

    /// Returns the modulus of the field.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(17).unwrap();
    /// assert_eq!(field.modulus(), 17);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns `⌊q / 2⌋`, the midpoint a plaintext 1-bit is shifted to.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(7).unwrap();
    /// assert_eq!(field.half(), 3);
    /// ```
    pub fn half(&self) -> i64 {
        (self.modulus / 2) as i64
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// Handles negative values correctly by adding the modulus.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(11).unwrap();
    /// assert_eq!(field.normalize(14), 3);
    /// assert_eq!(field.normalize(-3), 8);
    /// assert_eq!(field.normalize(0), 0);
    /// assert_eq!(field.normalize(11), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        let q = self.modulus as i64;

        let rem = value % q;
        if rem < 0 {
            return rem + q;
        }

        rem
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(11).unwrap();
    /// assert_eq!(field.add(7, 5), 1);
    /// assert_eq!(field.add(-2, 5), 3);
    /// ```
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_add(b_norm))
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(11).unwrap();
    /// assert_eq!(field.sub(7, 5), 2);
    /// assert_eq!(field.sub(3, 5), 9);
    /// ```
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        self.normalize(a_norm.wrapping_sub(b_norm))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before
    /// the modulo operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(11).unwrap();
    /// assert_eq!(field.mul(7, 5), 2); // 35 mod 11 = 2
    /// assert_eq!(field.mul(-2, 6), 10); // -12 mod 11 = 10
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let a_norm = self.normalize(a);
        let b_norm = self.normalize(b);

        let result = (a_norm as i128 * b_norm as i128) % (self.modulus as i128);

        self.normalize(result as i64)
    }

    /// Computes the additive inverse `-a mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(11).unwrap();
    /// assert_eq!(field.neg(3), 8);
    /// assert_eq!(field.neg(0), 0);
    /// assert!(field.add(3, field.neg(3)) == 0);
    /// ```
    pub fn neg(&self, a: i64) -> i64 {
        if a == 0 {
            return 0;
        }

        self.normalize(((-a as i128) % self.modulus as i128) as _)
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse exists if and only if `gcd(a, modulus) == 1`; for a prime
    /// modulus that is every nonzero residue. Uses the Extended Euclidean
    /// Algorithm.
    ///
    /// # Errors
    ///
    /// Returns `LweCryptoError::NoInverse` if the inverse does not exist
    /// (i.e., `gcd(a, modulus) != 1`, in particular when `a` is 0).
    ///
    /// # Example
    ///
    /// ```
    /// # use lwe_crypto::field::Field;
    /// let field = Field::try_with(7).unwrap();
    /// assert_eq!(field.inv(3).unwrap(), 5); // 3 * 5 = 15 = 1 mod 7
    /// assert_eq!(field.inv(6).unwrap(), 6); // 6 * 6 = 36 = 1 mod 7
    /// assert!(field.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, LweCryptoError> {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return Err(LweCryptoError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let (g, x, _) = extended_gcd(a_norm, self.modulus as i64);
        if g != 1 {
            return Err(LweCryptoError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        Ok(self.normalize(x))
    }
}
