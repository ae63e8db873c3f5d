use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::{json, Value};
use shared_config::AppConfig;
use shared_models::auth::TokenClaims;

use crate::jwt;

/// Test configuration mirroring `AppConfig` with throwaway values.
/// Cell tests point `database_url` at a wiremock server.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub database_url: String,
    pub database_api_key: String,
    pub jwt_secret: String,
    pub mail_api_url: String,
    pub mail_api_token: String,
    pub mail_from: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: "http://localhost:54321".to_string(),
            database_api_key: "test-api-key".to_string(),
            jwt_secret: "test-jwt-secret-for-unit-tests".to_string(),
            mail_api_url: String::new(),
            mail_api_token: String::new(),
            mail_from: "clinic@example.com".to_string(),
        }
    }
}

impl TestConfig {
    /// Config whose store calls land on the given mock server.
    pub fn with_store(store_url: &str) -> Self {
        Self {
            database_url: store_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            database_api_key: self.database_api_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            mail_api_url: self.mail_api_url.clone(),
            mail_api_token: self.mail_api_token.clone(),
            mail_from: self.mail_from.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Helpers for minting tokens in tests.
pub struct JwtTestUtils;

impl JwtTestUtils {
    /// Signs a token for a user or doctor account. `role` decides which
    /// id claim is populated, matching what login issues.
    pub fn create_test_token(
        account_id: i32,
        email: &str,
        role: &str,
        secret: &str,
        exp_hours: i64,
    ) -> String {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: account_id.to_string(),
            user_id: if role == "doctor" { None } else { Some(account_id) },
            doctor_id: if role == "doctor" { Some(account_id) } else { None },
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(exp_hours)).timestamp(),
        };
        jwt::sign_token(&claims, secret).unwrap()
    }

    pub fn create_expired_token(account_id: i32, email: &str, role: &str, secret: &str) -> String {
        Self::create_test_token(account_id, email, role, secret, -1)
    }

    /// Token signed with a different secret, so validation must reject it.
    pub fn create_invalid_signature_token(account_id: i32, email: &str, role: &str) -> String {
        Self::create_test_token(account_id, email, role, "wrong-secret", 24)
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned row payloads in the shape the row store returns them.
pub struct MockStoreResponses;

impl MockStoreResponses {
    /// Fixed argon2 digest string for seeding password columns. Tests that
    /// exercise login mint a real hash for the password they submit.
    pub fn placeholder_hash() -> String {
        "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaGVkcGFzc3dvcmQ".to_string()
    }

    pub fn user_row(
        user_id: i32,
        email: &str,
        is_verified: bool,
        verification_code: Option<&str>,
    ) -> Value {
        json!({
            "user_id": user_id,
            "first_name": "Test",
            "last_name": "User",
            "email": email,
            "password": Self::placeholder_hash(),
            "contact_phone": "0700000000",
            "address": "123 Clinic Lane",
            "role": "user",
            "is_verified": is_verified,
            "verification_code": verification_code,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    /// Projection returned by the credentials lookup during login.
    pub fn user_credentials_row(
        user_id: i32,
        email: &str,
        password_hash: &str,
        is_verified: bool,
    ) -> Value {
        json!({
            "user_id": user_id,
            "email": email,
            "password": password_hash,
            "is_verified": is_verified
        })
    }

    pub fn doctor_row(
        doctor_id: i32,
        email: &str,
        is_verified: bool,
        verification_code: Option<&str>,
    ) -> Value {
        json!({
            "doctor_id": doctor_id,
            "first_name": "Test",
            "last_name": "Doctor",
            "specialization": "Dermatology",
            "email": email,
            "password": Self::placeholder_hash(),
            "contact_phone": "0711111111",
            "available_days": "Mon - Fri",
            "role": "doctor",
            "is_verified": is_verified,
            "verification_code": verification_code,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn doctor_credentials_row(
        doctor_id: i32,
        email: &str,
        password_hash: &str,
        is_verified: bool,
    ) -> Value {
        json!({
            "doctor_id": doctor_id,
            "email": email,
            "password": password_hash,
            "is_verified": is_verified
        })
    }

    pub fn appointment_row(appointment_id: i32, user_id: i32, doctor_id: i32) -> Value {
        json!({
            "appointment_id": appointment_id,
            "user_id": user_id,
            "doctor_id": doctor_id,
            "appointment_date": "2025-01-15",
            "time_slot": "10:00 - 11:00",
            "total_amount": 500,
            "appointment_status": "Pending",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn prescription_row(
        prescription_id: i32,
        appointment_id: i32,
        doctor_id: i32,
        patient_id: i32,
    ) -> Value {
        json!({
            "prescription_id": prescription_id,
            "appointment_id": appointment_id,
            "doctor_id": doctor_id,
            "patient_id": patient_id,
            "notes": "1 capsule, three times daily, after meals",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn payment_row(payment_id: i32, appointment_id: i32, amount: i32) -> Value {
        json!({
            "payment_id": payment_id,
            "appointment_id": appointment_id,
            "amount": amount,
            "transaction_id": null,
            "payment_status": "Pending",
            "payment_date": "2024-01-01T00:00:00Z",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn complaint_row(complaint_id: i32, user_id: i32, subject: &str) -> Value {
        json!({
            "complaint_id": complaint_id,
            "user_id": user_id,
            "related_appointment_id": null,
            "subject": subject,
            "description": "The waiting time was far too long.",
            "status": "Open",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    /// Body the row store sends alongside a 409.
    pub fn conflict_error() -> Value {
        json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })
    }

    pub fn api_error(message: &str) -> Value {
        json!({
            "code": "PGRST000",
            "message": message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::validate_token;

    #[test]
    fn test_config_maps_to_app_config() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.database_url, "http://localhost:54321");
        assert_eq!(app_config.database_api_key, "test-api-key");
        assert!(!app_config.jwt_secret.is_empty());
    }

    #[test]
    fn test_token_round_trips_through_validation() {
        let secret = "test-secret";
        let token = JwtTestUtils::create_test_token(7, "test@example.com", "user", secret, 1);

        assert_eq!(token.split('.').count(), 3);

        let claims = validate_token(&token, secret).unwrap();
        assert_eq!(claims.user_id, Some(7));
        assert_eq!(claims.doctor_id, None);
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn doctor_token_carries_doctor_id_claim() {
        let secret = "test-secret";
        let token = JwtTestUtils::create_test_token(3, "doc@example.com", "doctor", secret, 1);

        let claims = validate_token(&token, secret).unwrap();
        assert_eq!(claims.doctor_id, Some(3));
        assert_eq!(claims.user_id, None);
    }
}
