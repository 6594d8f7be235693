use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::payment_requests::{InsertPaymentRequestEntity, PaymentRequestEntity},
    value_objects::{enums::payment_statuses::PaymentStatus, payments::TransitionOutcome},
};

#[automock]
#[async_trait]
pub trait PaymentRequestRepository {
    /// Creates a new request in `Pending` status, newest-first.
    async fn insert(
        &self,
        insert_payment_request_entity: InsertPaymentRequestEntity,
    ) -> Result<PaymentRequestEntity>;

    async fn find_by_id(&self, payment_id: i64) -> Result<Option<PaymentRequestEntity>>;

    async fn list_all(&self) -> Result<Vec<PaymentRequestEntity>>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<PaymentRequestEntity>>;

    /// Moves a request out of `Pending` exactly once. The check and the write
    /// happen under one lock so concurrent admin decisions cannot both apply.
    async fn transition_from_pending(
        &self,
        payment_id: i64,
        status: PaymentStatus,
    ) -> Result<TransitionOutcome>;
}
