use crate::codeword::Codeword;
use crate::error::{CodeError, Result};
use crate::matrix::BitMatrix;
use crate::mesh;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Add;

/// A set of distinct codewords sharing one fixed length.
///
/// Backed by an ordered set, so iteration, `Display` output and the row
/// order of [`to_matrix`](Code::to_matrix) are deterministic, and codes
/// themselves can live in ordered sets, which is how the mesh search
/// collapses duplicate candidates reached along different expansion orders.
///
/// Codes are immutable: expansion and translation return new instances.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Code {
    words: BTreeSet<Codeword>,
}

impl Code {
    /// Collects the given words into a code, dropping duplicates.
    ///
    /// # Panics
    ///
    /// Panics if the words do not all have the same length.
    pub fn new(words: impl IntoIterator<Item = Codeword>) -> Self {
        let words: BTreeSet<Codeword> = words.into_iter().collect();
        if let Some(first) = words.iter().next() {
            assert!(
                words.iter().all(|w| w.len() == first.len()),
                "codewords in a code must share one length"
            );
        }
        Code { words }
    }

    /// The code holding a single word.
    pub fn from_word(word: Codeword) -> Self {
        Code {
            words: BTreeSet::from([word]),
        }
    }

    /// Number of codewords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the code has no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Codeword) -> bool {
        self.words.contains(word)
    }

    /// Iterates over the words in ascending order.
    pub fn words(&self) -> impl Iterator<Item = &Codeword> + '_ {
        self.words.iter()
    }

    /// Multiset of Hamming distances over all ordered pairs of distinct
    /// words. Zero self-distances are excluded.
    pub fn weights(&self) -> Vec<usize> {
        let mut weights = vec![];
        for w1 in &self.words {
            for w2 in &self.words {
                if w1 != w2 {
                    weights.push(w1.distance(w2));
                }
            }
        }
        weights
    }

    /// The distinct pairwise distances: a structural fingerprint that
    /// survives relabeling of bit positions.
    pub fn weight_set(&self) -> BTreeSet<usize> {
        let mut weights = BTreeSet::new();
        for w1 in &self.words {
            for w2 in &self.words {
                if w1 != w2 {
                    weights.insert(w1.distance(w2));
                }
            }
        }
        weights
    }

    /// The code distance: the minimum pairwise Hamming distance.
    ///
    /// # Errors
    ///
    /// [`CodeError::DegenerateCode`] for codes of fewer than two words,
    /// where no pairwise distance exists.
    pub fn min_distance(&self) -> Result<usize> {
        self.weight_set()
            .into_iter()
            .next()
            .ok_or(CodeError::DegenerateCode(self.len()))
    }

    /// Stacks the words as rows of a GF(2) matrix, in ascending word order.
    pub fn to_matrix(&self) -> BitMatrix {
        let words: Vec<&Codeword> = self.words.iter().collect();
        let cols = words.first().map_or(0, |w| w.len());
        BitMatrix::build(words.len(), cols, |i, j| words[i].bit(j))
    }

    /// A basis for the row space of the code: the nonzero rows of the
    /// reduced echelon form of [`to_matrix`](Code::to_matrix). For a linear
    /// code this is a generator matrix.
    pub fn echelon_basis(&self) -> BitMatrix {
        let (reduced, pivots) = self.to_matrix().reduced_echelon();
        reduced.sub_matrix(0..pivots.len(), 0..reduced.cols())
    }

    /// The frontier of the code: every word at exactly `distance` from some
    /// member and at least `distance` from all members.
    pub fn nearest_words(&self, distance: usize) -> BTreeSet<Codeword> {
        let mut frontier = BTreeSet::new();
        for word in &self.words {
            frontier.extend(word.neighbors_at_distance(distance));
        }
        frontier
            .into_iter()
            .filter(|cand| self.words.iter().all(|w| w.distance(cand) >= distance))
            .collect()
    }

    /// Grows the code through `partitions` rounds of mesh expansion; see
    /// [`mesh::expand`].
    ///
    /// # Errors
    ///
    /// [`CodeError::InvalidPartitions`] if `partitions` is zero.
    pub fn nearest_mesh(&self, distance: usize, partitions: usize) -> Result<BTreeSet<Code>> {
        mesh::expand(self, distance, partitions)
    }

    /// The 16-word [7,4] Hamming code: the span of four generator words.
    pub fn hamming() -> Code {
        let generators = [
            Codeword::new(0b111_0000, 7),
            Codeword::new(0b100_1100, 7),
            Codeword::new(0b010_1010, 7),
            Codeword::new(0b110_1001, 7),
        ];
        let mut words = BTreeSet::new();
        for mask in 0u32..16 {
            let mut word = Codeword::zero(7);
            for (i, g) in generators.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    word = word.xor_with(g);
                }
            }
            words.insert(word);
        }
        Code { words }
    }
}

impl FromIterator<Codeword> for Code {
    fn from_iter<T: IntoIterator<Item = Codeword>>(iter: T) -> Self {
        Code::new(iter)
    }
}

/// Translates every word of the code by `offset`.
impl Add<Codeword> for &Code {
    type Output = Code;

    fn add(self, offset: Codeword) -> Code {
        Code {
            words: self.words.iter().map(|w| w.xor_with(&offset)).collect(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w}")?;
        }
        write!(f, "}}")
    }
}
