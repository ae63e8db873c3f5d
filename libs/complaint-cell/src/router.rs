use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{
    create_complaint, delete_complaint, get_complaint_by_id, get_complaints, update_complaint,
};

pub fn create_complaint_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/complaint", post(create_complaint))
        .route("/complaints", get(get_complaints))
        .route(
            "/complaint/{id}",
            get(get_complaint_by_id)
                .put(update_complaint)
                .delete(delete_complaint),
        )
        .with_state(config)
}
