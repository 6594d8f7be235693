use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{InsertUserEntity, UserEntity},
        repositories::users::UserRepository,
        value_objects::{credits::CreditAdjustment, enums::credit_directions::CreditDirection},
    },
    infrastructure::memory::memory_store::MemoryStore,
};

pub struct UserMemory {
    store: Arc<MemoryStore>,
}

impl UserMemory {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserMemory {
    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        let user = UserEntity {
            id: Uuid::new_v4(),
            name: insert_user_entity.name,
            email: insert_user_entity.email,
            password: insert_user_entity.password,
            credits: insert_user_entity.credits,
            role: insert_user_entity.role,
            created_at: Utc::now(),
        };

        let mut users = self.store.users.write().await;
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let users = self.store.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserEntity>> {
        let users = self.store.users.read().await;
        Ok(users.clone())
    }

    async fn adjust_credits(
        &self,
        user_id: Uuid,
        amount: i64,
        direction: CreditDirection,
    ) -> Result<Option<CreditAdjustment>> {
        let mut users = self.store.users.write().await;

        let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
            return Ok(None);
        };

        let clamped = match direction {
            CreditDirection::Add => {
                user.credits += amount;
                false
            }
            CreditDirection::Deduct => {
                let clamped = amount > user.credits;
                user.credits = (user.credits - amount).max(0);
                clamped
            }
        };

        Ok(Some(CreditAdjustment {
            user: user.clone(),
            clamped,
        }))
    }
}
