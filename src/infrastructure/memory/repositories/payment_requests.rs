use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::payment_requests::{InsertPaymentRequestEntity, PaymentRequestEntity},
        repositories::payment_requests::PaymentRequestRepository,
        value_objects::{enums::payment_statuses::PaymentStatus, payments::TransitionOutcome},
    },
    infrastructure::memory::memory_store::MemoryStore,
};

pub struct PaymentRequestMemory {
    store: Arc<MemoryStore>,
}

impl PaymentRequestMemory {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PaymentRequestRepository for PaymentRequestMemory {
    async fn insert(
        &self,
        insert_payment_request_entity: InsertPaymentRequestEntity,
    ) -> Result<PaymentRequestEntity> {
        let request = PaymentRequestEntity {
            id: self.store.next_payment_request_id(),
            user_id: insert_payment_request_entity.user_id,
            user_name: insert_payment_request_entity.user_name,
            plan: insert_payment_request_entity.plan,
            amount: insert_payment_request_entity.amount,
            credits: insert_payment_request_entity.credits,
            transaction_id: insert_payment_request_entity.transaction_id,
            date: Utc::now(),
            status: PaymentStatus::Pending,
        };

        let mut requests = self.store.payment_requests.write().await;
        requests.insert(0, request.clone());

        Ok(request)
    }

    async fn find_by_id(&self, payment_id: i64) -> Result<Option<PaymentRequestEntity>> {
        let requests = self.store.payment_requests.read().await;
        Ok(requests.iter().find(|r| r.id == payment_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PaymentRequestEntity>> {
        let requests = self.store.payment_requests.read().await;
        Ok(requests.clone())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentRequestEntity>> {
        let requests = self.store.payment_requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn transition_from_pending(
        &self,
        payment_id: i64,
        status: PaymentStatus,
    ) -> Result<TransitionOutcome> {
        // Check and write under one write lock: two racing decisions cannot
        // both observe `Pending`.
        let mut requests = self.store.payment_requests.write().await;

        let Some(request) = requests.iter_mut().find(|r| r.id == payment_id) else {
            return Ok(TransitionOutcome::NotFound);
        };

        if request.status.is_decided() {
            return Ok(TransitionOutcome::AlreadyDecided(request.clone()));
        }

        request.status = status;
        Ok(TransitionOutcome::Applied(request.clone()))
    }
}
