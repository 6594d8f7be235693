use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    value_objects::{credits::CreditAdjustment, enums::credit_directions::CreditDirection},
};

#[automock]
#[async_trait]
pub trait UserRepository {
    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;

    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;

    async fn list_all(&self) -> Result<Vec<UserEntity>>;

    /// Applies a credit mutation atomically. Deductions floor at zero; an
    /// unknown user yields `None` rather than an error.
    async fn adjust_credits(
        &self,
        user_id: Uuid,
        amount: i64,
        direction: CreditDirection,
    ) -> Result<Option<CreditAdjustment>>;
}
