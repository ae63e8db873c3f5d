use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{
    create_prescription, delete_prescription, get_prescription_by_id, get_prescriptions,
    update_prescription,
};

pub fn create_prescription_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/prescription", post(create_prescription))
        .route("/prescriptions", get(get_prescriptions))
        .route(
            "/prescription/{id}",
            get(get_prescription_by_id)
                .put(update_prescription)
                .delete(delete_prescription),
        )
        .with_state(config)
}
