use super::Block;
use super::pow;

/// Walk a candidate chain checking hash linkage and proof-of-work on every
/// adjacent pair. A single-block chain is trivially valid; an empty one is
/// not. Pure: no mutation, no network access.
pub fn valid_chain(chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.previous_hash != prev.hash() {
            return false;
        }
        if !pow::valid_proof(prev.proof, curr.proof) {
            return false;
        }
    }
    true
}
