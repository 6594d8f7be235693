use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;

/// A manual credit top-up request. `user_name` is a snapshot taken at
/// submission time so admin listings survive later renames.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequestEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub user_name: String,
    pub plan: String,
    pub amount: i64,
    pub credits: i64,
    pub transaction_id: String,
    pub date: DateTime<Utc>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone)]
pub struct InsertPaymentRequestEntity {
    pub user_id: Uuid,
    pub user_name: String,
    pub plan: String,
    pub amount: i64,
    pub credits: i64,
    pub transaction_id: String,
}
