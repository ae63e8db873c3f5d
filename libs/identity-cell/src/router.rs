use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

/// Account routes for both kinds, mounted at the application root so the
/// public paths stay stable.
pub fn create_identity_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/verify", post(verify_user))
        .route("/user/login", post(login_user))
        .route("/users", get(get_users))
        .route(
            "/user/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
        .route("/doctor", post(create_doctor))
        .route("/doctor/verify", post(verify_doctor))
        .route("/doctor/login", post(login_doctor))
        .route("/doctors", get(get_doctors))
        .route(
            "/doctor/{id}",
            get(get_doctor_by_id).put(update_doctor).delete(delete_doctor),
        )
        .with_state(config)
}
