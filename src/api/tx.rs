use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, NewTransactionRequest, NewTransactionResponse, PendingResponse};

/// Queue a transaction for the next mined block. All three fields are
/// required; a partial payload is a client error.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTransactionRequest>,
) -> impl Responder {
    let (Some(sender), Some(recipient), Some(amount)) =
        (body.sender.clone(), body.recipient.clone(), body.amount)
    else {
        warn!("TX - rejected submission with missing fields");
        return HttpResponse::BadRequest().body("Missing values");
    };

    let index = {
        let mut bc = state.blockchain.lock().expect("mutex poisoned");
        bc.new_transaction(sender, recipient, amount)
    };
    info!("TX - queued transfer for block {index}");
    HttpResponse::Created().json(NewTransactionResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// Transactions waiting to be mined into the next block.
#[get("/transactions/pending")]
pub async fn pending_transactions(state: web::Data<AppState>) -> impl Responder {
    let bc = state.blockchain.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        count: bc.pending().len(),
        transactions: bc.pending().to_vec(),
    })
}
