use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One completed generation: the prompt and the produced images as data URLs.
/// Appended only after the external call succeeded and credits were deducted.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationEntity {
    pub id: i64,
    pub user_id: Uuid,
    pub prompt: String,
    pub images: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertGenerationEntity {
    pub user_id: Uuid,
    pub prompt: String,
    pub images: Vec<String>,
}
