use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::enums::user_roles::UserRole;

/// An account in the storefront. `password` is an opaque comparison string
/// (the store is a demo — there is deliberately no hashing) and must never be
/// serialized out.
#[derive(Debug, Clone, Serialize)]
pub struct UserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub credits: i64,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertUserEntity {
    pub name: String,
    pub email: String,
    pub password: String,
    pub credits: i64,
    pub role: UserRole,
}
