use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};
use crate::blockchain::consensus::ChainSnapshot;

/// Full chain plus its length. Doubles as the payload peers fetch during
/// conflict resolution, so the path stays at the root.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainSnapshot {
        chain: bc.chain().to_vec(),
        length: bc.len(),
    })
}

/// Validate the locally held chain.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: bc.is_valid(),
        length: bc.len(),
    })
}
