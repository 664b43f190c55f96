use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF, validate};
use crate::transaction::Transaction;

/// In-memory ledger: the block chain plus the pool of transactions waiting
/// to be mined into the next block. Owns both exclusively; callers serialize
/// mutation through a single lock.
#[derive(Debug)]
pub struct Blockchain {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Blockchain {
    /// Start a chain with its genesis block. The chain is never empty after
    /// construction.
    pub fn new() -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        bc.new_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        bc
    }

    /// Forge a block from the pending pool and append it. The pool is drained
    /// into the block, exactly once. When `previous_hash` is not supplied it
    /// is computed from the current last block.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Queue a transaction for the next mined block. Returns the index of the
    /// block expected to hold it; advisory only, since a concurrent mine can
    /// land first and shift which block actually receives the pool.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        });
        self.last_block().index + 1
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Validate the locally held chain.
    pub fn is_valid(&self) -> bool {
        validate::valid_chain(&self.chain)
    }

    /// Adopt a replacement chain wholesale. Only conflict resolution calls
    /// this, after the candidate has been validated; the pending pool is
    /// left untouched.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Blockchain;
    use crate::blockchain::{
        GENESIS_PREVIOUS_HASH, GENESIS_PROOF, MINING_REWARD, REWARD_SENDER, pow,
    };

    #[test]
    fn starts_with_genesis() {
        let bc = Blockchain::new();
        assert_eq!(bc.len(), 1);
        let genesis = bc.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, GENESIS_PROOF);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(genesis.transactions.is_empty());
    }

    #[test]
    fn transaction_reports_next_block_index() {
        let mut bc = Blockchain::new();
        assert_eq!(bc.new_transaction("a", "b", 5), 2);
        // Still index 2 until a block is forged.
        assert_eq!(bc.new_transaction("b", "c", 1), 2);
    }

    #[test]
    fn forging_drains_the_pool() {
        let mut bc = Blockchain::new();
        bc.new_transaction("a", "b", 5);
        bc.new_transaction("b", "c", 1);
        let block = bc.new_block(12345, None);
        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 2);
        assert!(bc.pending().is_empty());

        // A follow-up block with no submissions carries no transactions.
        let next = bc.new_block(67890, None);
        assert_eq!(next.index, 3);
        assert!(next.transactions.is_empty());
    }

    #[test]
    fn forged_block_links_to_predecessor() {
        let mut bc = Blockchain::new();
        let genesis_hash = bc.last_block().hash();
        let block = bc.new_block(1, None);
        assert_eq!(block.previous_hash, genesis_hash);
    }

    #[test]
    fn mine_after_submission_yields_two_transactions() {
        let mut bc = Blockchain::new();
        assert_eq!(bc.new_transaction("a", "b", 5), 2);

        let (last_proof, last_hash) = {
            let last = bc.last_block();
            (last.proof, last.hash())
        };
        let proof = pow::proof_of_work(last_proof);
        bc.new_transaction(REWARD_SENDER, "node", MINING_REWARD);
        let block = bc.new_block(proof, Some(last_hash));

        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 2);
        assert!(bc.is_valid());
    }

    #[test]
    fn replace_chain_swaps_wholesale() {
        let mut bc = Blockchain::new();
        bc.new_transaction("a", "b", 5);
        let other = Blockchain::new();
        let replacement = other.chain().to_vec();
        bc.replace_chain(replacement);
        assert_eq!(bc.len(), 1);
        // The pool survives a swap.
        assert_eq!(bc.pending().len(), 1);
    }
}
