mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

/// Routes are registered flat: peers fetch each other's `/chain`, so the
/// paths double as the inter-node protocol.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(chain::get_chain)
        .service(chain::validate_chain)
        .service(mining::mine)
        .service(tx::new_transaction)
        .service(tx::pending_transactions)
        .service(nodes::register_nodes)
        .service(nodes::list_nodes)
        .service(nodes::resolve_conflicts);
}
