use std::sync::atomic::Ordering;

use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::blockchain::consensus;

/// Register one or more peer nodes, by full URL or bare host:port.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let nodes = match body.nodes.as_deref() {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => {
            return HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes");
        }
    };
    for address in nodes {
        if let Err(err) = state.peers.register(address) {
            warn!("PEERS - rejected {address:?}: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    }
    info!("PEERS - registry now holds {} node(s)", state.peers.len());
    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        total_nodes: state.peers.snapshot(),
    })
}

/// Current peer registry.
#[get("/nodes")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let nodes = state.peers.snapshot();
    HttpResponse::Ok().json(NodesResponse {
        count: nodes.len(),
        nodes,
    })
}

/// Run longest-valid-chain conflict resolution against the registered
/// peers. Individual peer failures are skipped; the swap re-checks length
/// under the ledger lock since the chain may have grown while fetching.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.snapshot();
    let local_len = {
        let bc = state.blockchain.lock().expect("mutex poisoned");
        bc.len()
    };

    let winner = consensus::resolve(&state.http, &peers, local_len).await;

    let (replaced, chain, length) = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        match winner {
            Some(candidate) if candidate.len() > bc.len() => {
                bc.replace_chain(candidate);
                state.chain_epoch.fetch_add(1, Ordering::AcqRel);
                (true, bc.chain().to_vec(), bc.len())
            }
            _ => (false, bc.chain().to_vec(), bc.len()),
        }
    };

    let message = if replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    info!("CONSENSUS - {message} (length {length})");
    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        chain,
        length,
    })
}
