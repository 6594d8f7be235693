use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::generations::{GenerationEntity, InsertGenerationEntity},
        repositories::generations::GenerationRepository,
    },
    infrastructure::memory::memory_store::MemoryStore,
};

pub struct GenerationMemory {
    store: Arc<MemoryStore>,
}

impl GenerationMemory {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GenerationRepository for GenerationMemory {
    async fn insert(
        &self,
        insert_generation_entity: InsertGenerationEntity,
    ) -> Result<GenerationEntity> {
        let generation = GenerationEntity {
            id: self.store.next_generation_id(),
            user_id: insert_generation_entity.user_id,
            prompt: insert_generation_entity.prompt,
            images: insert_generation_entity.images,
            timestamp: Utc::now(),
        };

        let mut generations = self.store.generations.write().await;
        generations.insert(0, generation.clone());

        Ok(generation)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<GenerationEntity>> {
        let generations = self.store.generations.read().await;
        Ok(generations
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }
}
