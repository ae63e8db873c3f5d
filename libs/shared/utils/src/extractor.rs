use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use shared_config::AppConfig;
use shared_models::auth::TokenClaims;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Middleware for session-token authentication. Validated claims land in
/// the request extensions for downstream handlers.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Unauthorized: No token provided".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Unauthorized: Invalid token".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Unauthorized: No token provided".to_string()));
    }

    let token = &auth_value[7..];

    let claims = validate_token(token, &config.jwt_secret)
        .map_err(|_| AppError::Auth("Unauthorized: Invalid token".to_string()))?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Role gate for protected routes layered behind `auth_middleware`.
pub fn ensure_role(claims: &TokenClaims, allowed_roles: &[&str]) -> Result<(), AppError> {
    if allowed_roles.contains(&claims.role.as_str()) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden: Insufficient role".to_string()))
    }
}
