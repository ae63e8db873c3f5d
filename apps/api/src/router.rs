use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::create_appointment_router;
use complaint_cell::create_complaint_router;
use identity_cell::create_identity_router;
use payment_cell::create_payment_router;
use prescription_cell::create_prescription_router;
use shared_config::AppConfig;

/// Cell routers carry their full paths, so they merge at the root
/// rather than nesting under a prefix.
pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, World" }))
        .merge(create_identity_router(state.clone()))
        .merge(create_appointment_router(state.clone()))
        .merge(create_prescription_router(state.clone()))
        .merge(create_payment_router(state.clone()))
        .merge(create_complaint_router(state))
}
