use sha2::{Digest, Sha256};

use super::DIFFICULTY_PREFIX;

/// How many candidates the solver tries between polls of its abort hook.
const ABORT_POLL_INTERVAL: u64 = 4096;

/// Check a candidate against the puzzle: the SHA-256 hex digest of the
/// decimal forms of `last_proof` then `proof`, concatenated with no
/// separator, must start with [`DIFFICULTY_PREFIX`].
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(DIFFICULTY_PREFIX)
}

/// Brute-force search from zero upward; returns the smallest valid proof.
/// CPU-bound and blocking.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof = 0u64;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same search with a cooperative abort hook, polled every
/// [`ABORT_POLL_INTERVAL`] candidates. Returns `None` when aborted, which
/// lets a miner abandon work against a tip that no longer exists.
pub fn solve(last_proof: u64, should_abort: impl Fn() -> bool) -> Option<u64> {
    let mut proof = 0u64;
    loop {
        if valid_proof(last_proof, proof) {
            return Some(proof);
        }
        proof += 1;
        if proof % ABORT_POLL_INTERVAL == 0 && should_abort() {
            return None;
        }
    }
}
