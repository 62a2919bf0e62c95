use std::fmt;

/// Errors raised at the API boundaries of the crate.
///
/// Every variant marks a violated precondition. All operations here are pure
/// and deterministic, so none of these are worth retrying, and no partial
/// result is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// Mesh expansion needs at least one partition.
    InvalidPartitions(usize),
    /// Horizontal stacking needs equal row counts.
    RowCountMismatch { left: usize, right: usize },
    /// The canonical transform needs a full row-rank input.
    RankDeficient { rank: usize, rows: usize },
    /// Minimum distance is undefined for codes of fewer than two words.
    DegenerateCode(usize),
    /// Factorials of arguments this large overflow the integer domain.
    FactorialOverflow(u64),
    /// Binomial coefficients require `k <= n`.
    InvalidBinomial { n: u64, k: u64 },
    /// Codeword strings must be nonempty `0`/`1` sequences of at most 32
    /// characters.
    InvalidBitString(String),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPartitions(p) => {
                write!(f, "partition count must be positive, got {p}")
            }
            Self::RowCountMismatch { left, right } => {
                write!(f, "cannot stack matrices with {left} and {right} rows")
            }
            Self::RankDeficient { rank, rows } => {
                write!(
                    f,
                    "matrix has rank {rank} but {rows} rows; pass a basis-reduced matrix"
                )
            }
            Self::DegenerateCode(size) => {
                write!(f, "minimum distance is undefined for a code of {size} word(s)")
            }
            Self::FactorialOverflow(n) => write!(f, "{n}! does not fit in 128 bits"),
            Self::InvalidBinomial { n, k } => {
                write!(f, "binomial coefficient C({n}, {k}) requires k <= n")
            }
            Self::InvalidBitString(s) => write!(f, "not a valid codeword bit string: {s:?}"),
        }
    }
}

impl std::error::Error for CodeError {}

pub type Result<T> = std::result::Result<T, CodeError>;
