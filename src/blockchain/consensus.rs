use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Block, PEER_FETCH_TIMEOUT_SECS, validate};

/// Wire shape of a node's chain: served by the chain endpoint and fetched
/// back from peers during conflict resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Fetch one peer's chain, best effort. Unreachable peers, error statuses
/// and undecodable bodies are logged and skipped; never retried.
pub async fn fetch_chain(client: &Client, peer: &str) -> Option<ChainSnapshot> {
    let url = format!("http://{peer}/chain");
    let response = match client
        .get(&url)
        .timeout(Duration::from_secs(PEER_FETCH_TIMEOUT_SECS))
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!("CONSENSUS - peer {peer} unreachable: {err}");
            return None;
        }
    };
    if !response.status().is_success() {
        warn!("CONSENSUS - peer {peer} answered {}", response.status());
        return None;
    }
    match response.json::<ChainSnapshot>().await {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!("CONSENSUS - peer {peer} sent an undecodable chain: {err}");
            None
        }
    }
}

/// Pick the replacement chain: the candidate with the strictly greatest
/// reported length (ties lose) that also passes full validation, and only
/// if it beats the local length. Candidates failing validation are dropped
/// even when momentarily winning on length.
pub fn select_longest_valid(
    local_len: usize,
    candidates: impl IntoIterator<Item = ChainSnapshot>,
) -> Option<Vec<Block>> {
    let mut max_length = local_len;
    let mut winner = None;
    for candidate in candidates {
        if candidate.length > max_length && validate::valid_chain(&candidate.chain) {
            max_length = candidate.length;
            winner = Some(candidate.chain);
        }
    }
    winner
}

/// Fan out to every registered peer concurrently, each fetch bounded by its
/// own timeout, and select the longest valid candidate. The caller performs
/// the adoption swap under the ledger lock.
pub async fn resolve(client: &Client, peers: &[String], local_len: usize) -> Option<Vec<Block>> {
    debug!(
        "CONSENSUS - polling {} peer(s), local length {local_len}",
        peers.len()
    );
    let fetches = peers.iter().map(|peer| fetch_chain(client, peer));
    let snapshots = join_all(fetches).await;
    select_longest_valid(local_len, snapshots.into_iter().flatten())
}

#[cfg(test)]
mod tests {
    use super::{ChainSnapshot, select_longest_valid};
    use crate::blockchain::{Block, Blockchain, pow};

    fn mined_chain(blocks: usize) -> Vec<Block> {
        let mut bc = Blockchain::new();
        for i in 1..blocks {
            let (last_proof, last_hash) = {
                let last = bc.last_block();
                (last.proof, last.hash())
            };
            bc.new_transaction("a", "b", i as u64);
            bc.new_block(pow::proof_of_work(last_proof), Some(last_hash));
        }
        bc.chain().to_vec()
    }

    fn snapshot(chain: Vec<Block>) -> ChainSnapshot {
        let length = chain.len();
        ChainSnapshot { chain, length }
    }

    /// A chain that reports a winning length but fails validation.
    fn bogus_chain(blocks: usize) -> Vec<Block> {
        (1..=blocks as u64)
            .map(|i| Block::new(i, Vec::new(), i, "junk".into()))
            .collect()
    }

    #[test]
    fn longer_valid_candidate_wins() {
        let adopted = select_longest_valid(3, vec![snapshot(mined_chain(5))]);
        assert_eq!(adopted.map(|c| c.len()), Some(5));
    }

    #[test]
    fn longer_invalid_candidate_is_discarded() {
        let adopted = select_longest_valid(3, vec![snapshot(bogus_chain(6))]);
        assert!(adopted.is_none());
    }

    #[test]
    fn equal_length_does_not_replace() {
        let three = mined_chain(3);
        assert!(select_longest_valid(3, vec![snapshot(three)]).is_none());
    }

    #[test]
    fn shorter_candidate_is_ignored() {
        let two = mined_chain(2);
        assert!(select_longest_valid(3, vec![snapshot(two)]).is_none());
    }

    #[test]
    fn longest_of_several_candidates_wins() {
        let five = mined_chain(5);
        let four = five[..4].to_vec();
        let adopted = select_longest_valid(
            1,
            vec![snapshot(four.clone()), snapshot(five), snapshot(four)],
        );
        assert_eq!(adopted.map(|c| c.len()), Some(5));
    }
}
