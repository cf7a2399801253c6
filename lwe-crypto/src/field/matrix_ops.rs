use crate::errors::LweCryptoError;
use crate::field::{Field, Matrix, Vector};

/// A·x where A is an m×n matrix and x is a length–n vector.
/// Returns an m‐vector.
pub fn matrix_vector_mul(a: &Matrix, x: &Vector, field: &Field) -> Result<Vector, LweCryptoError> {
    let m = a.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    let n = a[0].len();
    if x.len() != n {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Matrix columns ({}) must match vector length ({})",
            n,
            x.len()
        )));
    }

    let mut y = vec![0i64; m];
    for i in 0..m {
        if a[i].len() != n {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                a[i].len(),
                n
            )));
        }
        let mut sum = 0i64;
        for j in 0..n {
            let term = field.mul(a[i][j], x[j]);
            sum = field.add(sum, term);
        }
        y[i] = sum;
    }
    Ok(y)
}

/// x·A where x is a length–m row‐vector and A is m×n.
/// Returns a length–n row‐vector.
pub fn vector_matrix_mul(x: &Vector, a: &Matrix, field: &Field) -> Result<Vector, LweCryptoError> {
    let m = x.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    if a.len() != m {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Vector length ({}) must match matrix rows ({})",
            m,
            a.len()
        )));
    }
    let n = a[0].len();
    // sanity‐check ragged rows
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }

    let mut y = vec![0i64; n];
    for j in 0..n {
        let mut sum = 0i64;
        for i in 0..m {
            let term = field.mul(x[i], a[i][j]);
            sum = field.add(sum, term);
        }
        y[j] = sum;
    }
    Ok(y)
}

/// Scalar product `a · b` modulo the field modulus.
///
/// # Errors
///
/// Returns `LweCryptoError::DimensionMismatch` if the slices have different
/// lengths.
pub fn dot_product(a: &[i64], b: &[i64], field: &Field) -> Result<i64, LweCryptoError> {
    if a.len() != b.len() {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Vector lengths must match for dot product ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    let mut sum = 0i64;
    for (&ai, &bi) in a.iter().zip(b.iter()) {
        let term = field.mul(ai, bi);
        sum = field.add(sum, term);
    }
    Ok(sum)
}

/// Computes the matrix product `C = AB` modulo the field modulus.
///
/// # Errors
///
/// Returns `LweCryptoError::DimensionMismatch` if the inner dimensions of the
/// matrices do not match or if rows within the matrices have inconsistent
/// lengths.
pub fn matrix_mul(a: &Matrix, b: &Matrix, field: &Field) -> Result<Matrix, LweCryptoError> {
    let n = a.len(); // rows in A
    if n == 0 {
        return Ok(Matrix::new());
    }
    let m_common = a[0].len(); // cols in A

    if b.len() != m_common {
        return Err(LweCryptoError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common,
            b.len()
        )));
    }
    let p = if m_common == 0 { 0 } else { b[0].len() }; // cols in B

    let mut c = vec![vec![0; p]; n];

    for i in 0..n {
        if a[i].len() != m_common {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Matrix A row {} has incorrect length (expected {})",
                i, m_common
            )));
        }
        for j in 0..p {
            let mut sum = 0i64;
            #[allow(clippy::needless_range_loop)]
            for k in 0..m_common {
                if b[k].len() != p {
                    return Err(LweCryptoError::DimensionMismatch(format!(
                        "Matrix B row {} has incorrect length (expected {})",
                        k, p
                    )));
                }
                let term = field.mul(a[i][k], b[k][j]);
                sum = field.add(sum, term);
            }
            c[i][j] = sum;
        }
    }
    Ok(c)
}

/// Transpose of an m×n matrix.
///
/// # Errors
///
/// Returns `LweCryptoError::DimensionMismatch` if the matrix rows have
/// inconsistent lengths.
pub fn transpose(a: &Matrix) -> Result<Matrix, LweCryptoError> {
    let m = a.len();
    if m == 0 {
        return Ok(Matrix::new());
    }
    let n = a[0].len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Row {} has length {} but expected {}",
                i,
                row.len(),
                n
            )));
        }
    }

    let mut t = vec![vec![0i64; m]; n];
    for (i, row) in a.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            t[j][i] = val;
        }
    }
    Ok(t)
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> Matrix {
    let mut identity = vec![vec![0; n]; n];
    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        identity[i][i] = 1;
    }
    identity
}

/// Attempts to find the inverse of a square matrix modulo the field modulus
/// by Gauss–Jordan elimination.
///
/// # Errors
///
/// Returns `LweCryptoError::LinearDependence` when the matrix is singular
/// mod q (no invertible pivot in some column). Callers sampling random row
/// subsets hit this often; it is a recoverable condition, not a fault.
/// Returns `LweCryptoError::DimensionMismatch` if the matrix is not square.
pub fn matrix_inverse(matrix: &Matrix, field: &Field) -> Result<Matrix, LweCryptoError> {
    let n = matrix.len();
    // empty = empty
    if n == 0 {
        return Ok(Vec::new());
    }
    // check square
    for row in matrix.iter() {
        if row.len() != n {
            return Err(LweCryptoError::DimensionMismatch(
                "matrix_inverse: matrix must be square".into(),
            ));
        }
    }

    let mut work: Matrix = matrix
        .iter()
        .map(|row| row.iter().map(|&v| field.normalize(v)).collect())
        .collect();
    let mut inv = identity_matrix(n);

    for col in 0..n {
        // pivot search: first row at or below `col` with an invertible entry
        let mut pivot = None;
        for r in col..n {
            if let Ok(inverse) = field.inv(work[r][col]) {
                pivot = Some((r, inverse));
                break;
            }
        }
        let Some((pivot_row, pivot_inv)) = pivot else {
            return Err(LweCryptoError::LinearDependence(format!(
                "No invertible pivot in column {} mod {}",
                col,
                field.modulus()
            )));
        };
        work.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        // normalize row `col`
        for c in 0..n {
            work[col][c] = field.mul(work[col][c], pivot_inv);
            inv[col][c] = field.mul(inv[col][c], pivot_inv);
        }

        // eliminate all other rows
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = work[r][col];
            if factor != 0 {
                for c in 0..n {
                    let term = field.mul(factor, work[col][c]);
                    work[r][c] = field.sub(work[r][c], term);
                    let term = field.mul(factor, inv[col][c]);
                    inv[r][c] = field.sub(inv[r][c], term);
                }
            }
        }
    }

    Ok(inv)
}

/// Calculates the rank of a matrix over Z_q (q prime).
///
/// The rank is the number of linearly independent rows (or columns),
/// computed by Gaussian elimination with invertible pivots.
///
/// # Errors
///
/// Returns `LweCryptoError::DimensionMismatch` if the matrix rows have
/// inconsistent lengths.
pub fn matrix_rank(matrix: &Matrix, field: &Field) -> Result<usize, LweCryptoError> {
    let rows = matrix.len();
    if rows == 0 {
        return Ok(0);
    }
    let cols = matrix[0].len();
    if cols == 0 {
        return Ok(0);
    }

    let mut mat: Matrix = Vec::with_capacity(rows);
    for row in matrix.iter() {
        if row.len() != cols {
            return Err(LweCryptoError::DimensionMismatch(format!(
                "Matrix row has incorrect length (expected {})",
                cols
            )));
        }
        mat.push(row.iter().map(|&v| field.normalize(v)).collect());
    }

    let mut rank = 0;
    let mut pivot_row = 0;

    for col in 0..cols {
        if pivot_row >= rows {
            break;
        }

        let mut pivot = None;
        for r in pivot_row..rows {
            if let Ok(inverse) = field.inv(mat[r][col]) {
                pivot = Some((r, inverse));
                break;
            }
        }
        let Some((found_row, pivot_inv)) = pivot else {
            // no invertible entry in this column, try the next one
            continue;
        };

        mat.swap(pivot_row, found_row);
        for i in (pivot_row + 1)..rows {
            let factor = field.mul(mat[i][col], pivot_inv);
            if factor != 0 {
                for j in col..cols {
                    let term = field.mul(factor, mat[pivot_row][j]);
                    mat[i][j] = field.sub(mat[i][j], term);
                }
            }
        }
        pivot_row += 1;
        rank += 1;
    }

    Ok(rank)
}
