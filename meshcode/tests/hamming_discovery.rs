//! End-to-end discovery of the [7,4] Hamming codes from a single seed word.

use meshcode::{canonical_dual, is_hamming_parity_check, Code, CodeError, Codeword};
use std::collections::BTreeSet;

#[test]
fn zero_partitions_is_a_parameter_error() {
    let seed = Code::from_word(Codeword::zero(7));
    assert_eq!(seed.nearest_mesh(3, 0), Err(CodeError::InvalidPartitions(0)));
}

#[test]
fn mesh_search_discovers_every_hamming_code() {
    let seed = Code::from_word(Codeword::zero(7));

    let halves = seed.nearest_mesh(3, 8).unwrap();
    // an 8-word half code is the zero word plus 7 pairwise-compatible
    // weight-3 words: a Steiner triple system on 7 points, of which there
    // are exactly 30
    assert_eq!(halves.len(), 30);

    let mut full_codes = BTreeSet::new();
    for half in &halves {
        assert_eq!(half.len(), 8);
        for nearly_full in half.nearest_mesh(3, 8).unwrap() {
            assert_eq!(nearly_full.len(), 15);
            full_codes.extend(nearly_full.nearest_mesh(3, 1).unwrap());
        }
    }
    assert_eq!(full_codes.len(), 30);

    for code in &full_codes {
        assert_eq!(code.len(), 16);
        assert_eq!(code.min_distance().unwrap(), 3);
        assert_eq!(code.weight_set(), BTreeSet::from([3, 4, 7]));

        let basis = code.echelon_basis();
        assert_eq!(basis.rows(), 4);

        let parity = canonical_dual(&basis).unwrap();
        assert!((&basis * &parity.transposed()).is_zero());
        assert!(is_hamming_parity_check(&parity));
    }

    // combinatorially, every discovery is the same code up to relabeling
    let spectra: BTreeSet<_> = full_codes.iter().map(Code::weight_set).collect();
    assert_eq!(spectra.len(), 1);

    // the textbook generator span is among them
    assert!(full_codes.contains(&Code::hamming()));
}
