use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::store::{Store, StoreError};
use shared_models::error::AppError;

use crate::models::{CreatePaymentRequest, Payment, UpdatePaymentRequest};

const TABLE: &str = "payments";

pub struct PaymentService {
    store: Store,
}

fn store_error(err: StoreError) -> AppError {
    AppError::Internal(err.to_string())
}

fn decode(row: Value) -> Result<Payment, AppError> {
    serde_json::from_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

impl PaymentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Store::new(config),
        }
    }

    pub async fn create(&self, request: CreatePaymentRequest) -> Result<Option<Payment>, AppError> {
        let now = Utc::now().to_rfc3339();

        let mut row = Map::new();
        row.insert("appointment_id".to_string(), json!(request.appointment_id));
        row.insert("amount".to_string(), json!(request.amount));
        if let Some(transaction_id) = request.transaction_id {
            row.insert("transaction_id".to_string(), json!(transaction_id));
        }
        // Status and date fall back to the store defaults (Pending, now).
        if let Some(payment_status) = request.payment_status {
            row.insert("payment_status".to_string(), json!(payment_status));
        }
        if let Some(payment_date) = request.payment_date {
            row.insert("payment_date".to_string(), json!(payment_date));
        }
        row.insert("created_at".to_string(), json!(now));
        row.insert("updated_at".to_string(), json!(now));

        let rows = self
            .store
            .insert(TABLE, Value::Object(row))
            .await
            .map_err(store_error)?;
        debug!(
            "Payment of {} recorded for appointment {}",
            request.amount, request.appointment_id
        );
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Payment>, AppError> {
        let rows = self.store.select_all(TABLE).await.map_err(store_error)?;
        rows.into_iter().map(decode).collect()
    }

    pub async fn get(&self, id: i32) -> Result<Option<Payment>, AppError> {
        let rows = self
            .store
            .select_eq(TABLE, "payment_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdatePaymentRequest,
    ) -> Result<Option<Payment>, AppError> {
        let mut changes = Map::new();
        if let Some(appointment_id) = request.appointment_id {
            changes.insert("appointment_id".to_string(), json!(appointment_id));
        }
        if let Some(amount) = request.amount {
            changes.insert("amount".to_string(), json!(amount));
        }
        if let Some(transaction_id) = request.transaction_id {
            changes.insert("transaction_id".to_string(), json!(transaction_id));
        }
        if let Some(payment_status) = request.payment_status {
            changes.insert("payment_status".to_string(), json!(payment_status));
        }
        if let Some(payment_date) = request.payment_date {
            changes.insert("payment_date".to_string(), json!(payment_date));
        }
        changes.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let rows = self
            .store
            .update_eq(TABLE, "payment_id", id, Value::Object(changes))
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }

    pub async fn delete(&self, id: i32) -> Result<Option<Payment>, AppError> {
        let rows = self
            .store
            .delete_eq(TABLE, "payment_id", id)
            .await
            .map_err(store_error)?;
        rows.into_iter().next().map(decode).transpose()
    }
}
