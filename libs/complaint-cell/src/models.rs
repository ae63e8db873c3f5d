use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state for a filed complaint. The wire form of the second
/// variant carries a space, so it is renamed rather than cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: i32,
    pub user_id: i32,
    pub related_appointment_id: Option<i32>,
    pub subject: String,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComplaintRequest {
    pub user_id: i32,
    pub related_appointment_id: Option<i32>,
    pub subject: String,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComplaintRequest {
    pub user_id: Option<i32>,
    pub related_appointment_id: Option<i32>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
}
