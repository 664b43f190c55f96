use serde::{Deserialize, Serialize};

/// A transfer queued in the pending pool and, once mined, held by exactly
/// one block. Carries no identity beyond its field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}
