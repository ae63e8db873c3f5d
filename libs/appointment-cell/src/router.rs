use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{
    create_appointment, delete_appointment, get_appointment_by_id, get_appointments,
    update_appointment,
};

pub fn create_appointment_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/appointment", post(create_appointment))
        .route("/appointments", get(get_appointments))
        .route(
            "/appointment/{id}",
            get(get_appointment_by_id)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .with_state(config)
}
