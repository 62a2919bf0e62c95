//! Canonical generator ↔ parity-check conversion over GF(2), and the
//! structural test for Hamming parity-check matrices.

use crate::error::{CodeError, Result};
use crate::matrix::BitMatrix;
use rustc_hash::FxHashSet;

/// Converts a basis-reduced generator matrix into its canonical parity-check
/// matrix. Applied again it converts back: the transform is its own inverse
/// up to row space.
///
/// The reduced echelon form of the input is brought to systematic shape
/// `[I | A]` by moving its pivot columns to the front (in the order the
/// elimination claimed them), the dual `[Aᵀ | I]` is formed, and its columns
/// are scattered back so the result lines up with the original bit
/// positions. For matching `G` and `H`, `G · Hᵀ = 0` over GF(2).
///
/// # Errors
///
/// [`CodeError::RankDeficient`] when the input's echelon form has fewer
/// pivots than rows. Callers are expected to pass a basis (for instance from
/// [`Code::echelon_basis`](crate::Code::echelon_basis)); redundant rows are
/// rejected rather than silently permuted into garbage.
pub fn canonical_dual(matrix: &BitMatrix) -> Result<BitMatrix> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let (reduced, pivots) = matrix.reduced_echelon();
    if pivots.len() != rows {
        return Err(CodeError::RankDeficient {
            rank: pivots.len(),
            rows,
        });
    }

    // pivot columns first, then the rest in their original relative order:
    // the reduced matrix becomes systematic [I | A]
    let mut order = pivots.clone();
    order.extend((0..cols).filter(|c| !pivots.contains(c)));
    let systematic = BitMatrix::build(rows, cols, |i, j| reduced.bit(i, order[j]));

    let a = systematic.sub_matrix(0..rows, rows..cols);
    let dual = a.transposed().hstack(&BitMatrix::identity(cols - rows))?;

    // scatter the columns back to their original positions
    let mut position = vec![0; cols];
    for (i, &col) in order.iter().enumerate() {
        position[col] = i;
    }
    Ok(BitMatrix::build(cols - rows, cols, |i, j| {
        dual.bit(i, position[j])
    }))
}

/// Whether `h` is the parity-check matrix of a Hamming code, up to column
/// permutation: with `k = h.rows()` check bits, every nonzero `k`-bit
/// pattern must appear among the columns of `h`. Repeated and all-zero
/// columns are allowed on top of that.
pub fn is_hamming_parity_check(h: &BitMatrix) -> bool {
    let k = h.rows();
    if k == 0 || k >= usize::BITS as usize {
        return false;
    }
    let needed = (1usize << k) - 1;
    if h.cols() < needed {
        return false;
    }

    let transposed = h.transposed();
    let mut seen = FxHashSet::default();
    for i in 0..transposed.rows() {
        let mut value = 0usize;
        for j in 0..transposed.cols() {
            value = (value << 1) | usize::from(transposed.bit(i, j));
        }
        seen.insert(value);
    }
    (1..=needed).all(|v| seen.contains(&v))
}
