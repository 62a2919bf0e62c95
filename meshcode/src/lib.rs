//! `meshcode` searches for binary error-correcting codes of a fixed block
//! length by growing a seed code word-by-word through a constrained
//! neighborhood ("mesh") expansion, then verifies the algebraic structure of
//! what it finds with Gaussian elimination over the 2-element field.
//!
//! The crate is built from two subsystems:
//! - a combinatorial search core: [`Codeword`] (fixed-length binary words
//!   with Hamming-distance and XOR primitives), [`Code`] (sets of words with
//!   weight spectra and matrix conversions) and [`mesh::expand`] (the
//!   frontier search itself)
//! - a GF(2) linear algebra engine: [`BitVec`]/[`BitSlice`] packed bit
//!   storage, [`BitMatrix`] with Gaussian elimination and rank, and the
//!   canonical generator ↔ parity-check transform in [`canonical`]
//!
//! Everything is single-threaded and pure: searches and transforms take
//! immutable inputs and return new values. The only cross-call state is the
//! explicit [`FactorialCache`].

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::bool_assert_comparison,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::len_without_is_empty
)]

pub mod bits;
pub mod canonical;
pub mod code;
pub mod codeword;
pub mod combinatorics;
pub mod error;
pub mod matrix;
pub mod mesh;

pub use bits::{BitBlock, BitSlice, BitVec};
pub use canonical::{canonical_dual, is_hamming_parity_check};
pub use code::Code;
pub use codeword::Codeword;
pub use combinatorics::FactorialCache;
pub use error::CodeError;
pub use matrix::BitMatrix;
