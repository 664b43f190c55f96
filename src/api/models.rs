use std::sync::Mutex;
use std::sync::atomic::AtomicU64;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blockchain::{Block, Blockchain};
use crate::peers::PeerSet;
use crate::transaction::Transaction;

/// Shared application state: one in-memory ledger per process behind a
/// mutex, the peer registry, and the client used to poll peers.
pub struct AppState {
    /// This node's address for reward payouts, minted once at startup.
    pub node_id: String,
    pub blockchain: Mutex<Blockchain>,
    pub peers: PeerSet,
    /// Bumped on every chain append or replacement; in-flight miners poll
    /// it to abandon solves against a stale tip.
    pub chain_epoch: AtomicU64,
    pub http: Client,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            node_id: Uuid::new_v4().simple().to_string(),
            blockchain: Mutex::new(Blockchain::new()),
            peers: PeerSet::new(),
            chain_epoch: AtomicU64::new(0),
            http: Client::new(),
        }
    }
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

/// Fields arrive as options so presence can be checked explicitly and a
/// partial payload answered with one client error.
#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<u64>,
}

#[derive(Serialize)]
pub struct NewTransactionResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub count: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub count: usize,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
    pub length: usize,
}
