use crate::modules::cashier::controller::{
    delete_transaction, get_summary, get_transactions, record_transaction,
};
use crate::state::AppState;
use axum::{Router, routing::{delete, get, post}};

pub fn init_cashier_router() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(record_transaction).get(get_transactions))
        .route("/transactions/{id}", delete(delete_transaction))
        .route("/summary", get(get_summary))
}
