use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role column values shared by both account tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Doctor,
}

/// Which identity table an operation targets. Users and doctors share one
/// service contract; the kind picks table, id column, and role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    User,
    Doctor,
}

impl AccountKind {
    pub fn table(&self) -> &'static str {
        match self {
            AccountKind::User => "users",
            AccountKind::Doctor => "doctors",
        }
    }

    pub fn id_column(&self) -> &'static str {
        match self {
            AccountKind::User => "user_id",
            AccountKind::Doctor => "doctor_id",
        }
    }

    pub fn role_name(&self) -> &'static str {
        match self {
            AccountKind::User => "user",
            AccountKind::Doctor => "doctor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::User => "User",
            AccountKind::Doctor => "Doctor",
        }
    }
}

/// User account row as stored. The password hash deserializes from the
/// store but is never serialized into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
    pub is_verified: Option<bool>,
    pub verification_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub contact_phone: Option<String>,
    pub available_days: Option<String>,
    pub role: Role,
    pub is_verified: Option<bool>,
    pub verification_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration payload. Optional columns are omitted from the insert so
/// the store's defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_days: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Partial update for profile fields. Credentials and verification state
/// are not writable through this request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub contact_phone: Option<String>,
    pub available_days: Option<String>,
    pub role: Option<Role>,
}

/// Missing fields deserialize as empty strings so the handler can answer
/// with the credential failure message instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Credential projection pulled at login. Only what the password check and
/// the token need.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredCredentials {
    #[serde(alias = "user_id", alias = "doctor_id")]
    pub id: i32,
    pub email: String,
    pub password: String,
    pub is_verified: Option<bool>,
}
