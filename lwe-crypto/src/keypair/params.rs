use crate::errors::LweCryptoError;
use crate::field::Field;

use serde::{Deserialize, Serialize};

/// Parameters shared by key generation, the cipher transform, and the
/// attack engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LweParams {
    /// The field modulus q. Expected to be prime; see [`Field::try_with`].
    pub modulus: u64,
    /// Number of equations m, i.e. rows of the public matrix A.
    pub equation_count: usize,
    /// Length n of the secret vector, i.e. columns of A.
    pub secret_length: usize,
}

impl LweParams {
    /// Creates a new LweParams instance with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `LweCryptoError::InvalidModulus` for `modulus <= 2` and
    /// `LweCryptoError::InvalidParameters` unless `m >= n >= 1`. An m below
    /// n would leave no n-row subset to invert.
    pub fn try_with(
        modulus: u64,
        equation_count: usize,
        secret_length: usize,
    ) -> Result<Self, LweCryptoError> {
        Field::try_with(modulus)?;

        if secret_length == 0 {
            return Err(LweCryptoError::InvalidParameters(
                "Secret length n must be > 0".to_string(),
            ));
        }

        if equation_count < secret_length {
            return Err(LweCryptoError::InvalidParameters(format!(
                "Equation count m ({}) must be >= secret length n ({})",
                equation_count, secret_length
            )));
        }

        Ok(Self {
            modulus,
            equation_count,
            secret_length,
        })
    }

    /// Returns the field Z_q these parameters operate in.
    pub fn field(&self) -> Result<Field, LweCryptoError> {
        Field::try_with(self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = LweParams::try_with(97, 20, 6).unwrap();
        assert_eq!(params.modulus, 97);
        assert_eq!(params.equation_count, 20);
        assert_eq!(params.secret_length, 6);
        assert_eq!(params.field().unwrap().modulus(), 97);
    }

    #[test]
    fn test_square_system_allowed() {
        assert!(LweParams::try_with(7, 3, 3).is_ok());
    }

    #[test]
    fn test_rejects_small_modulus() {
        assert!(LweParams::try_with(2, 4, 2).is_err());
    }

    #[test]
    fn test_rejects_zero_secret_length() {
        assert!(LweParams::try_with(7, 4, 0).is_err());
    }

    #[test]
    fn test_rejects_underdetermined_shape() {
        assert!(LweParams::try_with(7, 2, 4).is_err());
    }
}
