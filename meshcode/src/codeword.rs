use crate::error::CodeError;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::BitXor;
use std::str::FromStr;

/// A fixed-length binary word of at most 32 bits.
///
/// The integer value and the bit-string rendering always agree: bit 0 is the
/// most significant (leftmost) character, which is also the column order used
/// when words become matrix rows. Codewords are value objects: equality,
/// ordering and hashing go by bit pattern and length, never by identity.
/// Every operation returns a new word.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Codeword {
    len: u8,
    bits: u32,
}

impl Codeword {
    /// The widest supported word.
    pub const MAX_LEN: usize = 32;

    /// Creates a word of `len` bits holding `value`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or exceeds [`Self::MAX_LEN`], or if `value`
    /// has bits set beyond `len`.
    pub fn new(value: u32, len: usize) -> Self {
        assert!(
            (1..=Self::MAX_LEN).contains(&len),
            "codeword length must be between 1 and 32"
        );
        assert!(
            len == Self::MAX_LEN || value < (1 << len),
            "value {value:#b} does not fit in {len} bits"
        );
        Codeword {
            len: len as u8,
            bits: value,
        }
    }

    /// The all-zeros word of `len` bits.
    pub fn zero(len: usize) -> Self {
        Self::new(0, len)
    }

    /// Number of bits in the word.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// The word as an unsigned integer, most significant bit first.
    #[inline]
    pub fn value(&self) -> u32 {
        self.bits
    }

    /// The bit at position `i`, counted from the most significant end.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.len(), "bit position {i} out of range");
        (self.bits >> (self.len() - 1 - i)) & 1 == 1
    }

    /// Number of ones in the word.
    #[inline]
    pub fn weight(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Hamming distance: the number of positions where the two words differ.
    ///
    /// # Panics
    ///
    /// Panics if the words have different lengths.
    #[inline]
    pub fn distance(&self, other: &Codeword) -> usize {
        assert_eq!(
            self.len, other.len,
            "codewords must have the same length for distance"
        );
        (self.bits ^ other.bits).count_ones() as usize
    }

    /// Bitwise XOR of the two words, the group operation of the binary
    /// vector space.
    ///
    /// # Panics
    ///
    /// Panics if the words have different lengths.
    #[inline]
    pub fn xor_with(&self, other: &Codeword) -> Codeword {
        assert_eq!(
            self.len, other.len,
            "codewords must have the same length for XOR"
        );
        Codeword {
            len: self.len,
            bits: self.bits ^ other.bits,
        }
    }

    /// Returns a copy with the bits at `positions` flipped.
    ///
    /// # Panics
    ///
    /// Panics if any position is out of range.
    pub fn flipped_at(&self, positions: &[usize]) -> Codeword {
        let mut bits = self.bits;
        for &p in positions {
            assert!(p < self.len(), "bit position {p} out of range");
            bits ^= 1 << (self.len() - 1 - p);
        }
        Codeword {
            len: self.len,
            bits,
        }
    }

    /// Reorders the bits: position `i` of the result holds position
    /// `order[i]` of `self`.
    ///
    /// # Panics
    ///
    /// Panics unless `order` names every position exactly as often as it is
    /// long and stays in range.
    pub fn permuted(&self, order: &[usize]) -> Codeword {
        assert_eq!(order.len(), self.len(), "permutation length mismatch");
        let mut bits = 0;
        for (i, &from) in order.iter().enumerate() {
            if self.bit(from) {
                bits |= 1 << (self.len() - 1 - i);
            }
        }
        Codeword {
            len: self.len,
            bits,
        }
    }

    /// All words at exactly `distance` from `self`.
    ///
    /// The strategy is picked once per call. Distance 3, the inner loop of
    /// the mesh search, uses a weight-3 mask table translated by XOR, which
    /// is valid because exact-distance neighborhoods are translation
    /// invariant under the group operation. Every other distance falls back
    /// to exhaustive substitution enumeration, which is exponential in
    /// `distance` and only suitable for small words.
    pub fn neighbors_at_distance(&self, distance: usize) -> BTreeSet<Codeword> {
        match NeighborStrategy::select(distance) {
            NeighborStrategy::MaskTable => self.mask_table_neighbors(),
            NeighborStrategy::Substitution => self.substitution_neighbors(distance),
        }
    }

    fn mask_table_neighbors(&self) -> BTreeSet<Codeword> {
        weight_three_masks(self.len())
            .map(|mask| Codeword {
                len: self.len,
                bits: self.bits ^ mask,
            })
            .collect()
    }

    fn substitution_neighbors(&self, distance: usize) -> BTreeSet<Codeword> {
        let mut generated = FxHashSet::default();
        generate_substitutions(*self, distance, &mut generated);
        generated
            .into_iter()
            .filter(|w| w != self && self.distance(w) == distance)
            .collect()
    }

    /// Iterates over every word of `len` bits, in increasing integer order.
    pub fn universe(len: usize) -> impl Iterator<Item = Codeword> {
        assert!(
            (1..=Self::MAX_LEN).contains(&len),
            "codeword length must be between 1 and 32"
        );
        (0..1u64 << len).map(move |value| Codeword {
            len: len as u8,
            bits: value as u32,
        })
    }

    /// Whether `other` lies within `threshold` bit flips of `self`, not
    /// counting `self` itself. With the default graph threshold of 1 this is
    /// the hypercube adjacency relation.
    pub fn is_adjacent(&self, other: &Codeword, threshold: usize) -> bool {
        let d = self.distance(other);
        0 < d && d <= threshold
    }
}

/// How to enumerate an exact-distance neighborhood.
enum NeighborStrategy {
    /// Precomputed weight-3 masks, translated to the query word by XOR.
    MaskTable,
    /// Recursive position-substitution enumeration, filtered afterwards.
    Substitution,
}

impl NeighborStrategy {
    fn select(distance: usize) -> Self {
        if distance == 3 {
            NeighborStrategy::MaskTable
        } else {
            NeighborStrategy::Substitution
        }
    }
}

/// All bit masks of weight 3 over `len` positions.
fn weight_three_masks(len: usize) -> impl Iterator<Item = u32> {
    (0..len).flat_map(move |i| {
        (i + 1..len).flat_map(move |j| (j + 1..len).map(move |k| (1 << i) | (1 << j) | (1 << k)))
    })
}

/// Recursively flips one position at a time, `remaining` levels deep. The
/// output contains duplicates and words closer than `remaining` flips (a
/// position can be flipped back), so callers filter to the exact distance.
fn generate_substitutions(word: Codeword, remaining: usize, out: &mut FxHashSet<Codeword>) {
    if remaining == 0 {
        out.insert(word);
        return;
    }
    for i in 0..word.len() {
        generate_substitutions(word.flipped_at(&[i]), remaining - 1, out);
    }
}

impl FromStr for Codeword {
    type Err = CodeError;

    /// Parses a bit string such as `"0101100"`, most significant bit first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > Self::MAX_LEN {
            return Err(CodeError::InvalidBitString(s.to_owned()));
        }
        let mut bits = 0;
        for c in s.chars() {
            bits <<= 1;
            match c {
                '0' => {}
                '1' => bits |= 1,
                _ => return Err(CodeError::InvalidBitString(s.to_owned())),
            }
        }
        Ok(Codeword {
            len: s.len() as u8,
            bits,
        })
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            write!(f, "{}", if self.bit(i) { 1 } else { 0 })?;
        }
        Ok(())
    }
}

impl BitXor for &Codeword {
    type Output = Codeword;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor_with(rhs)
    }
}

impl BitXor for Codeword {
    type Output = Codeword;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.xor_with(&rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn word(s: &str) -> Codeword {
        s.parse().unwrap()
    }

    #[test]
    fn string_and_integer_representations_agree() {
        let w = word("1011001");
        assert_eq!(w.value(), 0b1011001);
        assert_eq!(w.len(), 7);
        assert_eq!(w.to_string(), "1011001");
        assert_eq!(Codeword::new(0b1011001, 7), w);

        assert!(w.bit(0));
        assert!(!w.bit(1));
        assert!(w.bit(6));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Codeword>().is_err());
        assert!("01x1".parse::<Codeword>().is_err());
        assert!("0".repeat(33).parse::<Codeword>().is_err());
    }

    #[test]
    fn distance_is_a_metric() {
        let universe: Vec<Codeword> = Codeword::universe(7).collect();
        for a in &universe {
            assert_eq!(a.distance(a), 0);
        }
        for a in &universe {
            for b in &universe {
                assert_eq!(a.distance(b), b.distance(a));
                if a != b {
                    assert!(a.distance(b) > 0);
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..2000 {
            let a = universe[rng.random_range(0..universe.len())];
            let b = universe[rng.random_range(0..universe.len())];
            let c = universe[rng.random_range(0..universe.len())];
            assert!(a.distance(&c) <= a.distance(&b) + b.distance(&c));
        }
    }

    #[test]
    fn xor_is_self_inverse() {
        let mut rng = SmallRng::seed_from_u64(8);
        for _ in 0..500 {
            let a = Codeword::new(rng.random_range(0..128), 7);
            let m = Codeword::new(rng.random_range(0..128), 7);
            assert_eq!(a.xor_with(&m).xor_with(&m), a);
            assert_eq!(&a ^ &a, Codeword::zero(7));
            assert_eq!(a ^ m, m ^ a);
        }
    }

    #[test]
    fn mask_table_matches_exhaustive_enumeration() {
        for w in Codeword::universe(7) {
            let fast = w.mask_table_neighbors();
            let naive = w.substitution_neighbors(3);
            assert_eq!(fast, naive);
            assert_eq!(fast.len(), 35); // C(7, 3)
            assert!(fast.iter().all(|n| w.distance(n) == 3));
        }
    }

    #[test]
    fn substitution_neighbor_counts() {
        let w = word("0000000");
        assert_eq!(w.neighbors_at_distance(0).len(), 0);
        assert_eq!(w.neighbors_at_distance(1).len(), 7);
        assert_eq!(w.neighbors_at_distance(2).len(), 21); // C(7, 2)
    }

    #[test]
    fn flips_and_permutations() {
        let w = word("1000001");
        assert_eq!(w.flipped_at(&[0, 3]), word("0001001"));
        assert_eq!(w.flipped_at(&[]), w);

        // rotate left by one position
        assert_eq!(w.permuted(&[1, 2, 3, 4, 5, 6, 0]), word("0000011"));
        assert_eq!(w.permuted(&[0, 1, 2, 3, 4, 5, 6]), w);
    }

    #[test]
    fn weight_counts_ones() {
        assert_eq!(word("0000000").weight(), 0);
        assert_eq!(word("1101001").weight(), 4);
        assert_eq!(word("1111111").weight(), 7);
    }

    #[test]
    fn adjacency_threshold() {
        let a = word("0000000");
        let b = word("0000001");
        let c = word("0000011");
        assert!(a.is_adjacent(&b, 1));
        assert!(!a.is_adjacent(&c, 1));
        assert!(a.is_adjacent(&c, 2));
        assert!(!a.is_adjacent(&a, 1));
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn distance_requires_equal_lengths() {
        let _ = word("000").distance(&word("0000"));
    }
}
