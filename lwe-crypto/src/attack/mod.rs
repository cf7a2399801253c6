//! # Key-Recovery Attacks
//!
//! Recovers plaintext from `(ciphertext, public key)` alone, without the
//! secret. [`solve_key`] inverts a single exact linear system over Z_q;
//! [`vote_search`] samples every n-row subsystem of the public key in random
//! order, solves each, and lets agreeing candidates vote.

use crate::cipher::{self, Ciphertext};
use crate::errors::LweCryptoError;
use crate::field::matrix_ops::{matrix_inverse, matrix_mul, matrix_vector_mul, transpose};
use crate::field::{Field, Matrix, Vector};
use crate::keypair::keys::PublicKey;

use itertools::Itertools;
use num_integer::binomial;
use rand::Rng;
use rand::seq::SliceRandom;

use tracing::{debug, trace};

/// Default vote threshold: a candidate seen `DEFAULT_VOTE_THRESHOLD + 1`
/// times wins outright.
pub const DEFAULT_VOTE_THRESHOLD: usize = 4;

/// Occurrence counts for candidate plaintexts, in insertion order.
///
/// Insertion order is the tie-break order: when the search exhausts all
/// subsystems, [`best`](Self::best) returns the first-inserted candidate
/// among those with the highest count. Under a seeded shuffle this makes
/// the exhaustion result reproducible.
#[derive(Debug, Default)]
pub struct SolutionTally {
    entries: Vec<(Vector, usize)>,
}

impl SolutionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more sighting of `candidate` and returns its new count.
    pub fn record(&mut self, candidate: Vector) -> usize {
        for (existing, count) in self.entries.iter_mut() {
            if *existing == candidate {
                *count += 1;
                return *count;
            }
        }
        self.entries.push((candidate, 1));
        1
    }

    /// The candidate with the highest count; first-inserted wins ties.
    pub fn best(&self) -> Option<&Vector> {
        let mut best: Option<(&Vector, usize)> = None;
        for (candidate, count) in &self.entries {
            if best.is_none_or(|(_, best_count)| *count > best_count) {
                best = Some((candidate, *count));
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Recovers a candidate secret from `A·s = b` by the normal equations over
/// Z_q: `s = (AᵗA)⁻¹·Aᵗ·b`. Exact field arithmetic throughout; the inverse
/// is a true modular inverse, not a numeric approximation.
///
/// A may be any m×n matrix with m >= n. When A is square and full rank this
/// is the closed-form solution for the true secret.
///
/// # Errors
///
/// Returns `LweCryptoError::LinearDependence` when the Gram matrix AᵗA is
/// singular mod q — the expected outcome whenever A has fewer than n
/// linearly independent rows.
pub fn solve_secret(
    matrix_a: &Matrix,
    vector_b: &Vector,
    field: &Field,
) -> Result<Vector, LweCryptoError> {
    let a_t = transpose(matrix_a)?;
    let gram = matrix_mul(&a_t, matrix_a, field)?;
    let gram_inv = matrix_inverse(&gram, field)?;
    let a_t_b = matrix_vector_mul(&a_t, vector_b, field)?;

    matrix_vector_mul(&gram_inv, &a_t_b, field)
}

/// Recovers a candidate secret from `(A, b)` with [`solve_secret`] and
/// decrypts the ciphertext with it, returning the recovered plaintext.
///
/// # Errors
///
/// Propagates `LweCryptoError::LinearDependence` from the solve step. When
/// called standalone on a rank-deficient system this is the caller's cue to
/// retry with a different row subset.
pub fn solve_key(
    ciphertext: &Ciphertext,
    matrix_a: &Matrix,
    vector_b: &Vector,
    field: &Field,
) -> Result<Vector, LweCryptoError> {
    let candidate = solve_secret(matrix_a, vector_b, field)?;
    cipher::decrypt(ciphertext, &candidate, field)
}

/// Recovers the plaintext by majority vote over random n-row subsystems of
/// the public key.
///
/// Enumerates all C(m, n) row-index combinations in shuffled order. Each
/// combination yields an n×n subsystem handed to [`solve_key`]; singular
/// subsystems are skipped. A candidate plaintext returned by `theta + 1`
/// subsystems wins immediately — independently sampled subsystems that are
/// inconsistent with the true key almost never agree by chance, while
/// consistent ones always decrypt identically. If the combinations run out
/// first, the highest-tally candidate wins (ties: first recorded).
///
/// # Errors
///
/// - `LweCryptoError::InvalidParameters` if `theta` is 0.
/// - `LweCryptoError::DimensionMismatch` for an inconsistent public key.
/// - `LweCryptoError::NoSolutionFound` if no combination ever solves
///   (m < n, a composite modulus, or every subset singular).
pub fn vote_search<R: Rng>(
    ciphertext: &Ciphertext,
    public_key: &PublicKey,
    theta: usize,
    rng: &mut R,
) -> Result<Vector, LweCryptoError> {
    if theta == 0 {
        return Err(LweCryptoError::InvalidParameters(
            "Vote threshold theta must be >= 1".to_string(),
        ));
    }

    let field = public_key.params.field()?;
    let matrix_a = &public_key.matrix_a;
    let vector_b = &public_key.vector_b;

    let m = matrix_a.len();
    let n = public_key.params.secret_length;
    if vector_b.len() != m {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Public key has {} equations but {} right-hand sides",
            m,
            vector_b.len()
        )));
    }
    for (i, row) in matrix_a.iter().enumerate() {
        if row.len() != n {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }

    debug!(
        equations = m,
        unknowns = n,
        subsystems = binomial(m as u64, n as u64),
        theta,
        "enumerating candidate subsystems"
    );

    let mut combinations: Vec<Vec<usize>> = (0..m).combinations(n).collect();
    combinations.shuffle(rng);

    let mut tally = SolutionTally::new();
    let mut skipped = 0usize;

    for indices in &combinations {
        let (sub_a, sub_b) = select_rows(matrix_a, vector_b, indices);

        match solve_key(ciphertext, &sub_a, &sub_b, &field) {
            Ok(candidate) => {
                let count = tally.record(candidate.clone());
                trace!(count, ?indices, "subsystem solved");
                if count > theta {
                    debug!(agreements = count, skipped, "consensus reached");
                    return Ok(candidate);
                }
            }
            // The chosen rows were not linearly independent; try the next subset.
            Err(LweCryptoError::LinearDependence(_)) => {
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        candidates = tally.len(),
        skipped,
        "search exhausted, falling back to highest tally"
    );

    tally.best().cloned().ok_or_else(|| {
        LweCryptoError::NoSolutionFound(format!(
            "No solvable {}-row subsystem among {} equations mod {}",
            n,
            m,
            field.modulus()
        ))
    })
}

/// Recovers the plaintext with the default vote threshold. Pass-through to
/// [`vote_search`], kept as the one-call entry point.
pub fn recover<R: Rng>(
    ciphertext: &Ciphertext,
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<Vector, LweCryptoError> {
    vote_search(ciphertext, public_key, DEFAULT_VOTE_THRESHOLD, rng)
}

fn select_rows(matrix_a: &Matrix, vector_b: &Vector, indices: &[usize]) -> (Matrix, Vector) {
    let sub_a = indices.iter().map(|&i| matrix_a[i].clone()).collect();
    let sub_b = indices.iter().map(|&i| vector_b[i]).collect();
    (sub_a, sub_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_and_threshold() {
        let mut tally = SolutionTally::new();
        assert!(tally.is_empty());

        assert_eq!(tally.record(vec![1, 0, 1]), 1);
        assert_eq!(tally.record(vec![0, 0, 0]), 1);
        assert_eq!(tally.record(vec![1, 0, 1]), 2);
        assert_eq!(tally.record(vec![1, 0, 1]), 3);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_tally_best_prefers_highest_count() {
        let mut tally = SolutionTally::new();
        tally.record(vec![0, 1]);
        tally.record(vec![1, 1]);
        tally.record(vec![1, 1]);
        assert_eq!(tally.best(), Some(&vec![1, 1]));
    }

    #[test]
    fn test_tally_tie_breaks_to_first_inserted() {
        let mut tally = SolutionTally::new();
        tally.record(vec![0, 1]);
        tally.record(vec![1, 1]);
        tally.record(vec![0, 1]);
        tally.record(vec![1, 1]);
        assert_eq!(tally.best(), Some(&vec![0, 1]));
    }

    #[test]
    fn test_tally_empty_has_no_best() {
        assert_eq!(SolutionTally::new().best(), None);
    }

    #[test]
    fn test_solve_secret_square_full_rank() {
        let field = Field::try_with(7).unwrap();
        // A·s = b for s = [3, 5]
        let matrix_a = vec![vec![1, 2], vec![2, 3]];
        let vector_b = vec![6, 0];
        assert_eq!(
            solve_secret(&matrix_a, &vector_b, &field).unwrap(),
            vec![3, 5]
        );
    }

    #[test]
    fn test_solve_secret_overdetermined_consistent() {
        let field = Field::try_with(7).unwrap();
        let matrix_a = vec![vec![1, 0], vec![0, 1], vec![1, 2]];
        // b = A·[3, 5] = [3, 5, 13 mod 7]
        let vector_b = vec![3, 5, 6];
        assert_eq!(
            solve_secret(&matrix_a, &vector_b, &field).unwrap(),
            vec![3, 5]
        );
    }

    #[test]
    fn test_solve_secret_rank_deficient() {
        let field = Field::try_with(7).unwrap();
        let matrix_a = vec![vec![1, 2], vec![2, 4]];
        let vector_b = vec![1, 2];
        match solve_secret(&matrix_a, &vector_b, &field) {
            Err(LweCryptoError::LinearDependence(_)) => {}
            other => panic!("expected LinearDependence, got {:?}", other),
        }
    }

    #[test]
    fn test_select_rows() {
        let matrix_a = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        let vector_b = vec![7, 8, 9];
        let (sub_a, sub_b) = select_rows(&matrix_a, &vector_b, &[2, 0]);
        assert_eq!(sub_a, vec![vec![5, 6], vec![1, 2]]);
        assert_eq!(sub_b, vec![9, 7]);
    }
}
