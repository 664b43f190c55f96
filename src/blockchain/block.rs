use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block in the chain holding the transactions mined into it.
/// Append-only: once on the chain a block is never mutated. The hash is not
/// stored; it is recomputed from the canonical encoding on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix seconds (UTC), fractional
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Assemble a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: unix_now(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Canonical encoding: compact JSON with object keys sorted by name.
    /// Two blocks with equal field values encode to identical bytes no
    /// matter how they were constructed.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // serde_json::Value stores object members in key order.
        let value = serde_json::to_value(self).expect("serialize block");
        serde_json::to_vec(&value).expect("encode canonical JSON")
    }

    /// SHA-256 of the canonical encoding, as lowercase hex.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes());
        hex::encode(hasher.finalize())
    }
}

fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
