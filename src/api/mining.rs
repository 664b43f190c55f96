use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, info, warn};

use super::models::{AppState, MineResponse};
use crate::blockchain::{MINING_REWARD, REWARD_SENDER, pow};

/// Mine one block: solve the puzzle for the current tip, credit the reward
/// transaction, forge. The solve runs on the blocking pool against a tip
/// snapshot with no ledger lock held; the append re-checks the tip under the
/// lock and declines if the chain moved underneath.
#[get("/mine")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let (last_proof, previous_hash) = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        let last = bc.last_block();
        (last.proof, last.hash())
    };
    let epoch = state.chain_epoch.load(Ordering::Acquire);
    debug!("MINER - solving for last_proof={last_proof}");

    let solver_state = state.clone();
    let solved = web::block(move || {
        pow::solve(last_proof, || {
            solver_state.chain_epoch.load(Ordering::Acquire) != epoch
        })
    })
    .await;

    let proof = match solved {
        Ok(Some(proof)) => proof,
        Ok(None) => {
            warn!("MINER - abandoned solve: chain advanced underneath");
            return HttpResponse::Conflict().body("chain changed while mining");
        }
        Err(err) => {
            warn!("MINER - blocking task failed: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let block = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        if bc.last_block().hash() != previous_hash {
            warn!("MINER - discarding stale proof {proof}: tip moved before append");
            return HttpResponse::Conflict().body("chain changed while mining");
        }
        bc.new_transaction(REWARD_SENDER, state.node_id.clone(), MINING_REWARD);
        bc.new_block(proof, Some(previous_hash)).clone()
    };
    state.chain_epoch.fetch_add(1, Ordering::AcqRel);

    info!(
        "MINER - forged block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );
    HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    })
}
