use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::store::{Store, StoreError};
use shared_mailer::MailClient;
use shared_models::error::AppError;
use shared_utils::password;

use crate::models::{
    AccountKind, CreateDoctorRequest, CreateUserRequest, Doctor, StoredCredentials,
    UpdateDoctorRequest, UpdateUserRequest, User,
};

/// Registration, verification, login lookup, and account CRUD for both
/// account kinds. One service, two tables; `AccountKind` picks the table.
pub struct IdentityService {
    store: Store,
    config: Arc<AppConfig>,
}

fn store_error(err: StoreError) -> AppError {
    AppError::Internal(err.to_string())
}

fn decode<T: DeserializeOwned>(row: Value) -> Result<T, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

/// Uniformly random 6-digit code; the range keeps a leading zero impossible.
fn generate_verification_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

impl IdentityService {
    pub fn new(config: &Arc<AppConfig>) -> Self {
        Self {
            store: Store::new(config),
            config: Arc::clone(config),
        }
    }

    pub async fn register_user(&self, request: CreateUserRequest) -> Result<Option<User>, AppError> {
        match self.register(AccountKind::User, to_row(&request)?).await? {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    pub async fn register_doctor(
        &self,
        request: CreateDoctorRequest,
    ) -> Result<Option<Doctor>, AppError> {
        match self.register(AccountKind::Doctor, to_row(&request)?).await? {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    async fn register(
        &self,
        kind: AccountKind,
        mut row: Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let email = row
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let plaintext = row
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let hashed =
            password::hash_password(&plaintext).map_err(|e| AppError::Internal(e.to_string()))?;
        let code = generate_verification_code();
        let now = Utc::now().to_rfc3339();

        row.insert("password".to_string(), json!(hashed));
        row.insert("is_verified".to_string(), json!(false));
        row.insert("verification_code".to_string(), json!(code));
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));

        let mut created = self
            .store
            .insert(kind.table(), Value::Object(row))
            .await
            .map_err(store_error)?;
        if created.is_empty() {
            return Ok(None);
        }

        debug!("{} account registered for {}", kind.label(), email);
        self.dispatch_verification_mail(kind, email, code);

        Ok(Some(created.remove(0)))
    }

    /// Fire-and-forget; registration never waits on the mail provider.
    fn dispatch_verification_mail(&self, kind: AccountKind, to: String, code: String) {
        let config = Arc::clone(&self.config);
        tokio::spawn(async move {
            let client = match MailClient::new(&config) {
                Ok(client) => client,
                Err(e) => {
                    warn!("Skipping verification email for {}: {}", to, e);
                    return;
                }
            };

            let subject = format!("{} account verification", kind.label());
            let text = format!("Your verification code is {}", code);
            let html = format!("<p>Your verification code is <strong>{}</strong></p>", code);

            if let Err(e) = client.send(&to, &subject, &text, &html).await {
                warn!("Verification email to {} failed: {}", to, e);
            }
        });
    }

    /// Returns the updated row, or `None` when the account is missing,
    /// already verified, or the code does not match.
    pub async fn verify(
        &self,
        kind: AccountKind,
        email: &str,
        code: &str,
    ) -> Result<Option<Value>, AppError> {
        let rows = self
            .store
            .select_eq(kind.table(), "email", email)
            .await
            .map_err(store_error)?;
        let Some(account) = rows.first() else {
            return Ok(None);
        };

        let already_verified = account["is_verified"].as_bool().unwrap_or(false);
        let stored_code = account["verification_code"].as_str();
        if already_verified || stored_code != Some(code) {
            return Ok(None);
        }

        // Conditional on is_verified=false so of two concurrent verifies at
        // most one flips the flag; the loser matches zero rows.
        let updated = self
            .store
            .update_where(
                kind.table(),
                &[
                    ("email", email.to_string()),
                    ("is_verified", "false".to_string()),
                ],
                json!({
                    "is_verified": true,
                    "verification_code": null,
                    "updated_at": Utc::now().to_rfc3339(),
                }),
            )
            .await
            .map_err(store_error)?;

        Ok(updated.into_iter().next())
    }

    pub async fn login_lookup(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<StoredCredentials>, AppError> {
        let rows = self
            .store
            .select_eq_columns(
                kind.table(),
                "email",
                email,
                &[kind.id_column(), "email", "password", "is_verified"],
            )
            .await
            .map_err(store_error)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list_accounts(AccountKind::User).await
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        self.list_accounts(AccountKind::Doctor).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>, AppError> {
        self.get_account(AccountKind::User, id).await
    }

    pub async fn get_doctor(&self, id: i32) -> Result<Option<Doctor>, AppError> {
        self.get_account(AccountKind::Doctor, id).await
    }

    pub async fn update_user(
        &self,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        let mut changes = Map::new();
        if let Some(first_name) = request.first_name {
            changes.insert("first_name".to_string(), json!(first_name));
        }
        if let Some(last_name) = request.last_name {
            changes.insert("last_name".to_string(), json!(last_name));
        }
        if let Some(email) = request.email {
            changes.insert("email".to_string(), json!(email));
        }
        if let Some(contact_phone) = request.contact_phone {
            changes.insert("contact_phone".to_string(), json!(contact_phone));
        }
        if let Some(address) = request.address {
            changes.insert("address".to_string(), json!(address));
        }
        if let Some(role) = request.role {
            changes.insert("role".to_string(), json!(role));
        }

        self.update_account(AccountKind::User, id, changes).await
    }

    pub async fn update_doctor(
        &self,
        id: i32,
        request: UpdateDoctorRequest,
    ) -> Result<Option<Doctor>, AppError> {
        let mut changes = Map::new();
        if let Some(first_name) = request.first_name {
            changes.insert("first_name".to_string(), json!(first_name));
        }
        if let Some(last_name) = request.last_name {
            changes.insert("last_name".to_string(), json!(last_name));
        }
        if let Some(specialization) = request.specialization {
            changes.insert("specialization".to_string(), json!(specialization));
        }
        if let Some(email) = request.email {
            changes.insert("email".to_string(), json!(email));
        }
        if let Some(contact_phone) = request.contact_phone {
            changes.insert("contact_phone".to_string(), json!(contact_phone));
        }
        if let Some(available_days) = request.available_days {
            changes.insert("available_days".to_string(), json!(available_days));
        }
        if let Some(role) = request.role {
            changes.insert("role".to_string(), json!(role));
        }

        self.update_account(AccountKind::Doctor, id, changes).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<Option<User>, AppError> {
        self.delete_account(AccountKind::User, id).await
    }

    pub async fn delete_doctor(&self, id: i32) -> Result<Option<Doctor>, AppError> {
        self.delete_account(AccountKind::Doctor, id).await
    }

    async fn list_accounts<T: DeserializeOwned>(
        &self,
        kind: AccountKind,
    ) -> Result<Vec<T>, AppError> {
        let rows = self
            .store
            .select_all(kind.table())
            .await
            .map_err(store_error)?;
        rows.into_iter().map(decode).collect()
    }

    async fn get_account<T: DeserializeOwned>(
        &self,
        kind: AccountKind,
        id: i32,
    ) -> Result<Option<T>, AppError> {
        let rows = self
            .store
            .select_eq(kind.table(), kind.id_column(), id)
            .await
            .map_err(store_error)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    async fn update_account<T: DeserializeOwned>(
        &self,
        kind: AccountKind,
        id: i32,
        mut changes: Map<String, Value>,
    ) -> Result<Option<T>, AppError> {
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .store
            .update_eq(kind.table(), kind.id_column(), id, Value::Object(changes))
            .await
            .map_err(store_error)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }

    /// Delete returning the removed row so callers can tell a miss apart.
    async fn delete_account<T: DeserializeOwned>(
        &self,
        kind: AccountKind,
        id: i32,
    ) -> Result<Option<T>, AppError> {
        let rows = self
            .store
            .delete_eq(kind.table(), kind.id_column(), id)
            .await
            .map_err(store_error)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode(row)?)),
            None => Ok(None),
        }
    }
}

fn to_row<T: serde::Serialize>(request: &T) -> Result<Map<String, Value>, AppError> {
    match serde_json::to_value(request) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal(
            "registration payload must be an object".to_string(),
        )),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}
