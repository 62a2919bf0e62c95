//! Round-by-round frontier expansion: grows a distance-constrained code
//! word-by-word, carrying a whole set of candidate codes forward instead of
//! committing to a single extension order.

use crate::code::Code;
use crate::codeword::Codeword;
use crate::error::{CodeError, Result};
use std::collections::BTreeSet;
use tracing::trace;

/// Expands `seed` by admissible frontier words over `partitions` rounds.
///
/// The frontier is fixed up front: every word at *exactly* `distance` from
/// some seed member and at least `distance` from all members. Restricting
/// the frontier to the exact-distance shell is a deliberate heuristic: it
/// is what makes the distance-3 searches this crate targets tractable, and
/// it is not claimed to be exhaustive for other parameters.
///
/// With `partitions == 1` each frontier word on its own extends the seed,
/// giving one result per frontier word. With `partitions >= 2` the pair
/// phase first combines every frontier pair at mutual distance at least
/// `distance` with the seed, and `partitions - 3` admission rounds follow:
/// a frontier word joins a candidate only if its minimum distance to every
/// word already in the candidate is at least `distance`. A run therefore
/// adds `partitions - 1` words for `partitions >= 2`. Candidates that admit
/// no word in some round are dropped, and identical candidates reached along
/// different orders collapse by set semantics. An empty result is a
/// legitimate outcome, not an error.
///
/// Distances among the seed's own words are assumed to satisfy the
/// constraint already; they are not re-checked.
///
/// # Errors
///
/// [`CodeError::InvalidPartitions`] if `partitions` is zero.
pub fn expand(seed: &Code, distance: usize, partitions: usize) -> Result<BTreeSet<Code>> {
    if partitions == 0 {
        return Err(CodeError::InvalidPartitions(partitions));
    }

    let frontier = seed.nearest_words(distance);
    trace!(words = frontier.len(), "mesh frontier computed");

    if partitions == 1 {
        return Ok(frontier.iter().map(|w| extended(seed, [*w])).collect());
    }

    let mut candidates: BTreeSet<Code> = BTreeSet::new();
    for w1 in &frontier {
        for w2 in &frontier {
            if w1.distance(w2) >= distance {
                candidates.insert(extended(seed, [*w1, *w2]));
            }
        }
    }
    trace!(candidates = candidates.len(), "pair phase complete");

    if partitions == 2 {
        return Ok(candidates);
    }

    for round in 0..(partitions - 3) {
        let mut next = BTreeSet::new();
        for code in &candidates {
            for word in &frontier {
                // every candidate contains the seed, so min() is Some; a
                // word already present fails at distance 0
                let nearest = code.words().map(|c| c.distance(word)).min();
                if nearest.is_some_and(|d| d >= distance) {
                    next.insert(extended(code, [*word]));
                }
            }
        }
        trace!(
            round = round + 1,
            candidates = next.len(),
            "admission round complete"
        );
        candidates = next;
    }

    Ok(candidates)
}

fn extended(code: &Code, extra: impl IntoIterator<Item = Codeword>) -> Code {
    code.words().copied().chain(extra).collect()
}
