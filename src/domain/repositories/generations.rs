use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::generations::{GenerationEntity, InsertGenerationEntity};

#[automock]
#[async_trait]
pub trait GenerationRepository {
    /// Appends a completed generation, newest-first.
    async fn insert(
        &self,
        insert_generation_entity: InsertGenerationEntity,
    ) -> Result<GenerationEntity>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GenerationEntity>>;
}
