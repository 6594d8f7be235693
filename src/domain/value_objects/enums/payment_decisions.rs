use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::payment_statuses::PaymentStatus;

/// An admin verdict on a pending payment request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDecision {
    Approved,
    Rejected,
}

impl PaymentDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentDecision::Approved => "approved",
            PaymentDecision::Rejected => "rejected",
        }
    }

    pub fn to_status(self) -> PaymentStatus {
        match self {
            PaymentDecision::Approved => PaymentStatus::Approved,
            PaymentDecision::Rejected => PaymentStatus::Rejected,
        }
    }
}

impl Display for PaymentDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
