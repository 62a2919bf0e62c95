use crate::bits::{min_blocks, BitSlice, BitVec, BLOCKSIZE};
use crate::error::{CodeError, Result};
use rand::Rng;
use std::fmt;
use std::ops::{Index, Mul, Range};

/// A dense matrix over GF(2), bit-packed in row-major order.
///
/// Each row occupies `col_blocks` blocks of the underlying [`BitVec`]; when
/// the column count is not a multiple of [`BLOCKSIZE`] the tail of the last
/// block is padding and always holds zeros. All arithmetic is bitwise, so
/// entries can never leave {0, 1}.
///
/// Gaussian elimination reports the pivot columns it used, in the order it
/// found them. That order matters: the canonical generator/parity-check
/// transform in [`crate::canonical`] permutes columns by it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitMatrix {
    /// number of logical rows
    rows: usize,

    /// number of logical columns
    cols: usize,

    /// number of blocks used to store each row
    col_blocks: usize,

    /// row-major matrix data
    data: BitVec,
}

impl BitMatrix {
    /// Returns the entry at row `i`, column `j`.
    #[inline]
    pub fn bit(&self, i: usize, j: usize) -> bool {
        debug_assert!(i < self.rows && j < self.cols);
        self.data.bit(self.col_blocks * BLOCKSIZE * i + j)
    }

    /// Sets the entry at row `i`, column `j`.
    #[inline]
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) {
        debug_assert!(i < self.rows && j < self.cols);
        self.data.set_bit(self.col_blocks * BLOCKSIZE * i + j, b);
    }

    /// Builds a matrix by evaluating `f` at every (row, column) position.
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let col_blocks = min_blocks(cols);
        let data = (0..rows)
            .flat_map(|i| (0..BLOCKSIZE * col_blocks).map(move |j| (i, j)))
            .map(|(i, j)| if j < cols { f(i, j) } else { false })
            .collect();
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data,
        }
    }

    /// The all-zeros matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let col_blocks = min_blocks(cols);
        BitMatrix {
            rows,
            cols,
            col_blocks,
            data: BitVec::zeros(rows * col_blocks),
        }
    }

    /// The `n` by `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::build(n, n, |i, j| i == j)
    }

    /// A matrix of independently random entries.
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Self::build(rows, cols, |_, _| rng.random())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrows row `i` as a [`BitSlice`].
    #[inline]
    pub fn row(&self, i: usize) -> &BitSlice {
        &self.data[i * self.col_blocks..(i + 1) * self.col_blocks]
    }

    /// XORs `bits` into row `i`.
    #[inline]
    pub fn add_bits_to_row(&mut self, bits: &BitSlice, i: usize) {
        self.data.xor_in(bits, i * self.col_blocks);
    }

    #[inline]
    fn swap_rows(&mut self, a: usize, b: usize) {
        self.data
            .swap_range(a * self.col_blocks, b * self.col_blocks, self.col_blocks);
    }

    /// Gaussian elimination over GF(2), in place.
    ///
    /// Scans columns left to right; for each, the first row at or below the
    /// current pivot row with a nonzero entry is swapped into pivot position
    /// and cleared from the rows below it. With `full` set, a second
    /// bottom-up pass also clears the rows above each pivot, leaving the
    /// reduced row-echelon form.
    ///
    /// Returns the pivot columns in the order they were claimed.
    pub fn gauss(&mut self, full: bool) -> Vec<usize> {
        let mut row = 0;
        let mut pcol = 0;
        let mut pivots = vec![];
        while row < self.rows {
            let mut next_row = None;
            'scan: while pcol < self.cols {
                for i in row..self.rows {
                    if self.bit(i, pcol) {
                        next_row = Some(i);
                        break 'scan;
                    }
                }
                pcol += 1;
            }

            let Some(found) = next_row else { break };
            if found != row {
                self.swap_rows(row, found);
            }

            let pivot_row = self.row(row).to_vec();
            for i in (found + 1)..self.rows {
                if self.bit(i, pcol) {
                    self.add_bits_to_row(&pivot_row, i);
                }
            }

            pivots.push(pcol);
            row += 1;
            pcol += 1;
        }

        if full {
            for row in (0..pivots.len()).rev() {
                let pcol = pivots[row];
                let pivot_row = self.row(row).to_vec();
                for i in 0..row {
                    if self.bit(i, pcol) {
                        self.add_bits_to_row(&pivot_row, i);
                    }
                }
            }
        }

        pivots
    }

    /// The reduced row-echelon form of this matrix and its pivot columns,
    /// leaving `self` untouched.
    pub fn reduced_echelon(&self) -> (BitMatrix, Vec<usize>) {
        let mut reduced = self.clone();
        let pivots = reduced.gauss(true);
        (reduced, pivots)
    }

    /// The rank of the matrix, via elimination on a scratch copy.
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().gauss(false).len()
    }

    /// Returns a transposed copy of the matrix.
    pub fn transposed(&self) -> Self {
        Self::build(self.cols, self.rows, |i, j| self.bit(j, i))
    }

    /// Copies out the sub-matrix covering `rows` by `cols`.
    ///
    /// # Panics
    ///
    /// Panics if either range reaches outside the matrix.
    pub fn sub_matrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        assert!(
            rows.end <= self.rows && cols.end <= self.cols,
            "sub-matrix range out of bounds"
        );
        Self::build(rows.len(), cols.len(), |i, j| {
            self.bit(rows.start + i, cols.start + j)
        })
    }

    /// Concatenates `self` and `other` side by side.
    ///
    /// # Errors
    ///
    /// [`CodeError::RowCountMismatch`] unless both matrices have the same
    /// number of rows.
    pub fn hstack(&self, other: &BitMatrix) -> Result<Self> {
        if self.rows != other.rows {
            return Err(CodeError::RowCountMismatch {
                left: self.rows,
                right: other.rows,
            });
        }
        Ok(Self::build(self.rows, self.cols + other.cols, |i, j| {
            if j < self.cols {
                self.bit(i, j)
            } else {
                other.bit(i, j - self.cols)
            }
        }))
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        (0..self.rows).all(|i| self.row(i).iter().take(self.cols).all(|b| !b))
    }
}

/// Allows indexing the matrix with `m[(i, j)]` as a `bool`.
impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.bit(index.0, index.1) {
            &true
        } else {
            &false
        }
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.cols {
                write!(f, " {} ", if self.bit(i, j) { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// GF(2) matrix product: each output row accumulates, by XOR, the rows of
/// `rhs` selected by the 1-entries of the corresponding row of `self`.
impl Mul for &BitMatrix {
    type Output = BitMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!(
                "attempting to multiply matrices of incompatible dimensions: {} != {}",
                self.cols, rhs.rows
            );
        }
        let mut res = BitMatrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            let selectors: Vec<bool> = self.row(i).iter().take(self.cols).collect();
            for (j, selected) in selectors.into_iter().enumerate() {
                if selected {
                    let row = rhs.row(j).to_vec();
                    res.add_bits_to_row(&row, i);
                }
            }
        }

        res
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn from_rows(rows: &[&[u8]]) -> BitMatrix {
        BitMatrix::build(rows.len(), rows[0].len(), |i, j| rows[i][j] == 1)
    }

    #[test]
    fn identity() {
        let m = BitMatrix::identity(100);
        for i in 0..100 {
            for j in 0..100 {
                assert_eq!(m[(i, j)], i == j);
            }
        }
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = BitMatrix::random(&mut rng, 10, 70);
        let n = m.transposed();
        assert_eq!((n.rows(), n.cols()), (70, 10));
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m[(i, j)], n[(j, i)]);
            }
        }
        assert_eq!(n.transposed(), m);
    }

    #[test]
    fn sub_matrix() {
        let mut rng = SmallRng::seed_from_u64(2);
        let m = BitMatrix::random(&mut rng, 8, 12);
        let s = m.sub_matrix(2..5, 4..12);
        assert_eq!((s.rows(), s.cols()), (3, 8));
        for i in 0..3 {
            for j in 0..8 {
                assert_eq!(s[(i, j)], m[(2 + i, 4 + j)]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn sub_matrix_range_checked() {
        let m = BitMatrix::zeros(3, 3);
        let _ = m.sub_matrix(0..4, 0..3);
    }

    #[test]
    fn hstack() {
        let a = from_rows(&[&[1, 0], &[0, 1]]);
        let b = from_rows(&[&[1, 1, 1], &[0, 0, 1]]);
        let c = a.hstack(&b).unwrap();
        assert_eq!(c, from_rows(&[&[1, 0, 1, 1, 1], &[0, 1, 0, 0, 1]]));

        let tall = BitMatrix::zeros(3, 2);
        assert_eq!(
            a.hstack(&tall),
            Err(CodeError::RowCountMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn gauss_pivots_and_reduction() {
        let mut m = from_rows(&[
            &[0, 1, 1, 0, 1],
            &[1, 1, 0, 1, 0],
            &[1, 0, 1, 1, 0],
            &[0, 1, 1, 0, 1],
        ]);
        let pivots = m.gauss(true);
        assert_eq!(pivots, vec![0, 1, 4]);

        // rows above and below each pivot are cleared
        for (row, &pcol) in pivots.iter().enumerate() {
            for i in 0..m.rows() {
                assert_eq!(m[(i, pcol)], i == row);
            }
        }
        // the dependent row vanished
        for j in 0..m.cols() {
            assert!(!m[(3, j)]);
        }
    }

    #[test]
    fn reduced_echelon_is_idempotent() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let m = BitMatrix::random(&mut rng, 6, 9);
            let (r1, pivots) = m.reduced_echelon();
            let (r2, pivots2) = r1.reduced_echelon();
            assert_eq!(r1, r2);
            assert_eq!(pivots, pivots2);
            assert_eq!(pivots.len(), m.rank());
        }
    }

    #[test]
    fn rank() {
        assert_eq!(BitMatrix::identity(5).rank(), 5);
        assert_eq!(BitMatrix::zeros(4, 6).rank(), 0);

        let dependent = from_rows(&[&[1, 0, 1], &[0, 1, 1], &[1, 1, 0]]);
        assert_eq!(dependent.rank(), 2);
    }

    #[test]
    fn matrix_mult() {
        let mut rng = SmallRng::seed_from_u64(4);
        let m1 = BitMatrix::random(&mut rng, 8, 10);
        let m2 = BitMatrix::random(&mut rng, 10, 7);
        let m3 = &m1 * &m2;

        for i in 0..m3.rows() {
            for j in 0..m3.cols() {
                let mut b = false;
                for k in 0..m1.cols() {
                    b ^= m1.bit(i, k) & m2.bit(k, j);
                }
                assert_eq!(m3.bit(i, j), b);
            }
        }
    }

    #[test]
    fn mult_identity_is_identity() {
        let mut rng = SmallRng::seed_from_u64(5);
        let m = BitMatrix::random(&mut rng, 6, 6);
        assert_eq!(&m * &BitMatrix::identity(6), m);
        assert_eq!(&BitMatrix::identity(6) * &m, m);
    }

    #[test]
    fn is_zero() {
        assert!(BitMatrix::zeros(3, 70).is_zero());
        let mut m = BitMatrix::zeros(3, 70);
        m.set_bit(2, 69, true);
        assert!(!m.is_zero());
    }
}
