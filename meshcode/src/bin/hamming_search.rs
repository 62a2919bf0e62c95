//! Console driver: searches outward from the zero word for length-7,
//! distance-3 codes and reports whether everything found is a Hamming code.

use meshcode::{canonical_dual, is_hamming_parity_check, Code, Codeword, FactorialCache};
use std::collections::BTreeSet;
use std::error::Error;

const WORD_LENGTH: usize = 7;
const DISTANCE: usize = 3;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let seed = Code::from_word(Codeword::zero(WORD_LENGTH));

    // three expansion phases: 1 word -> 8 -> 15 -> 16
    let mut full_codes = BTreeSet::new();
    for half in seed.nearest_mesh(DISTANCE, 8)? {
        for nearly_full in half.nearest_mesh(DISTANCE, 8)? {
            full_codes.extend(nearly_full.nearest_mesh(DISTANCE, 1)?);
        }
    }

    for code in &full_codes {
        println!("{code}");
    }
    println!("discovered {} codes", full_codes.len());

    let mut all_hamming = true;
    for code in &full_codes {
        let parity = canonical_dual(&code.echelon_basis())?;
        all_hamming &= is_hamming_parity_check(&parity);
    }
    println!("all parity-check matrices are Hamming: {all_hamming}");

    let spectra: BTreeSet<_> = full_codes.iter().map(Code::weight_set).collect();
    println!("distinct weight configurations: {spectra:?}");

    if let Some(code) = full_codes.iter().next() {
        let basis = code.echelon_basis();
        println!("sample generator matrix:\n{basis}");
        println!("its parity-check matrix:\n{}", canonical_dual(&basis)?);

        let mut cache = FactorialCache::new();
        let ball = cache.sphere_packing_terms(WORD_LENGTH as u64, DISTANCE as u64)?;
        let bound = (1u128 << WORD_LENGTH) / ball;
        println!(
            "sphere-packing bound allows {bound} words; codes found have {} (perfect: {})",
            code.len(),
            code.len() as u128 == bound
        );
    }

    Ok(())
}
