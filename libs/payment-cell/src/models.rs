use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settlement record against an appointment. The status column is free
/// text from the payment provider, not an enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: i32,
    pub appointment_id: i32,
    pub amount: i32,
    pub transaction_id: Option<String>,
    pub payment_status: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub appointment_id: i32,
    pub amount: i32,
    pub transaction_id: Option<String>,
    pub payment_status: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub appointment_id: Option<i32>,
    pub amount: Option<i32>,
    pub transaction_id: Option<String>,
    pub payment_status: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}
