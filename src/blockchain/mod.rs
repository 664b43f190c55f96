pub mod block;
pub mod consensus;
pub mod model;
pub mod pow;
pub mod validate;

pub use block::Block;
pub use model::Blockchain;

/// Hex prefix a proof digest must carry. Fixed difficulty, not adjustable.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Proof baked into the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous-hash of the genesis block, which has no predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender recorded on the reward transaction minted with each block.
pub const REWARD_SENDER: &str = "0";

/// Amount granted for mining a block.
pub const MINING_REWARD: u64 = 1;

/// Per-peer timeout when fetching chains during conflict resolution.
pub const PEER_FETCH_TIMEOUT_SECS: u64 = 5;
