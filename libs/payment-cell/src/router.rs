use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{
    create_payment, delete_payment, get_payment_by_id, get_payments, update_payment,
};

pub fn create_payment_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/payment", post(create_payment))
        .route("/payments", get(get_payments))
        .route(
            "/payment/{id}",
            get(get_payment_by_id)
                .put(update_payment)
                .delete(delete_payment),
        )
        .with_state(config)
}
