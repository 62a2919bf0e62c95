use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::ops::{BitXorAssign, Deref, DerefMut, Index, Range};

/// A block of bits. This is an alias for [`u64`]
pub type BitBlock = u64;

/// Number of bits in a [`BitBlock`]
pub const BLOCKSIZE: usize = 64;

/// Bitwise AND with this constant to set the most significant bit to zero
pub const MSB_OFF: BitBlock = 0x7fffffffffffffff;

/// Bitwise OR with this constant to set the most significant bit to one
pub const MSB_ON: BitBlock = 0x8000000000000000;

/// Returns the minimum number of [`BitBlock`]s required to store `bits` bits,
/// rounding up when `bits` is not a multiple of [`BLOCKSIZE`].
#[inline]
pub fn min_blocks(bits: usize) -> usize {
    bits / BLOCKSIZE + if bits % BLOCKSIZE == 0 { 0 } else { 1 }
}

/// A vector of bits packed into 64-bit blocks.
///
/// Bits are addressed most-significant-first within each block, so bit 0 of
/// the vector is the top bit of block 0. [`BitMatrix`](crate::matrix::BitMatrix)
/// keeps all of its rows in a single `BitVec`; whole-row XOR and swap reduce
/// to the block operations provided by [`BitSlice`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct BitVec(Vec<BitBlock>);

/// A borrowed range of bits, represented as a slice of [`BitBlock`]s.
#[derive(RefCast, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct BitSlice([BitBlock]);

/// Iterator over the bits in a [`BitSlice`], most significant bit of the
/// first block onward.
pub struct BitIter<'a> {
    inner: std::slice::Iter<'a, BitBlock>,
    c: usize,
    block: BitBlock,
}

impl Iterator for BitIter<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.c == BLOCKSIZE {
            self.block = self.inner.next().copied()?;
            self.c = 0;
        }
        let bit = self.block & MSB_ON == MSB_ON;
        self.block <<= 1;
        self.c += 1;
        Some(bit)
    }
}

impl BitSlice {
    /// Returns an owned copy of the slice as a [`BitVec`].
    #[inline]
    pub fn to_vec(&self) -> BitVec {
        self.0.to_vec().into()
    }

    /// Returns an iterator over all bits in this slice as `bool`s.
    #[inline]
    pub fn iter(&self) -> BitIter {
        BitIter {
            inner: self.0.iter(),
            c: BLOCKSIZE,
            block: 0,
        }
    }

    /// Computes the dot product (mod 2) of two equal-length slices: `true`
    /// iff the number of positions where both are 1 is odd.
    #[inline]
    pub fn dot(&self, rhs: &BitSlice) -> bool {
        let mut c = 0;
        for (bits0, bits1) in self.0.iter().zip(rhs.0.iter()) {
            c ^= (*bits0 & *bits1).count_ones() & 1;
        }
        c == 1
    }

    /// Returns the value of the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is past the end of the slice.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let block = self.0[block_index].rotate_left(bit_index);
        block & MSB_ON == MSB_ON
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the index is past the end of the slice.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let mut block = self.0[block_index].rotate_left(bit_index);
        if value {
            block |= MSB_ON;
        } else {
            block &= MSB_OFF;
        }
        self.0[block_index] = block.rotate_right(bit_index);
    }

    /// XORs `source` into this slice starting at block `target_pos`.
    pub fn xor_in(&mut self, source: &BitSlice, target_pos: usize) {
        for i in 0..source.len() {
            self.0[target_pos + i] ^= source.0[i];
        }
    }

    /// Swaps two block ranges of length `len`, block by block.
    #[inline]
    pub fn swap_range(&mut self, source: usize, target: usize, len: usize) {
        for i in 0..len {
            self.0.swap(source + i, target + i);
        }
    }

    /// Length in blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the slice holds no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<Range<usize>> for BitSlice {
    type Output = BitSlice;
    fn index(&self, index: Range<usize>) -> &Self::Output {
        BitSlice::ref_cast(&self.0[index])
    }
}

impl BitVec {
    /// A vector of `num_blocks` random blocks.
    #[inline]
    pub fn random(rng: &mut impl Rng, num_blocks: usize) -> Self {
        (0..num_blocks).map(|_| rng.random::<BitBlock>()).collect()
    }

    /// A vector of `num_blocks` zero blocks.
    #[inline]
    pub fn zeros(num_blocks: usize) -> Self {
        BitVec(vec![0; num_blocks])
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bits in self.0.iter() {
            write!(f, "{:064b}", bits)?;
        }
        Ok(())
    }
}

impl BitXorAssign<&Self> for BitSlice {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &BitSlice) {
        for (bits0, bits1) in self.0.iter_mut().zip(rhs.0.iter()) {
            *bits0 ^= bits1;
        }
    }
}

impl From<Vec<BitBlock>> for BitVec {
    fn from(value: Vec<BitBlock>) -> Self {
        BitVec(value)
    }
}

impl FromIterator<BitBlock> for BitVec {
    fn from_iter<T: IntoIterator<Item = BitBlock>>(iter: T) -> Self {
        Vec::from_iter(iter).into()
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut v = vec![];
        let mut c = 0;
        let mut block: BitBlock = 0;
        for bit in iter {
            if bit {
                block |= 1;
            }
            c += 1;
            if c == BLOCKSIZE {
                c = 0;
                v.push(block);
                block = 0;
            } else {
                block <<= 1;
            }
        }

        if c != 0 {
            block <<= BLOCKSIZE - c - 1;
            v.push(block);
        }

        BitVec(v)
    }
}

impl Deref for BitVec {
    type Target = BitSlice;
    fn deref(&self) -> &Self::Target {
        BitSlice::ref_cast(&self.0)
    }
}

impl DerefMut for BitVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        BitSlice::ref_cast_mut(&mut self.0)
    }
}
