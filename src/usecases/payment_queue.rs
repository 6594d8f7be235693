use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::payment_requests::{InsertPaymentRequestEntity, PaymentRequestEntity},
    repositories::{payment_requests::PaymentRequestRepository, users::UserRepository},
    value_objects::{
        enums::{
            credit_directions::CreditDirection, payment_decisions::PaymentDecision,
        },
        payments::TransitionOutcome,
        plans::{TopUpPlan, find_plan_by_credits},
    },
};

#[derive(Debug, Error)]
pub enum PaymentQueueError {
    #[error("please enter a valid transaction id")]
    MissingTransactionId,
    #[error("unknown top-up plan")]
    UnknownPlan,
    #[error("user not found")]
    UnknownUser,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentQueueError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentQueueError::MissingTransactionId | PaymentQueueError::UnknownPlan => {
                StatusCode::BAD_REQUEST
            }
            PaymentQueueError::UnknownUser => StatusCode::NOT_FOUND,
            PaymentQueueError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PaymentQueueResult<T> = std::result::Result<T, PaymentQueueError>;

/// The manual top-up pipeline: users submit a paid transaction id for a
/// catalog plan, admins approve or reject. Approval credits the user exactly
/// once; the transition itself is the idempotency point, so repeated clicks
/// (or two admins racing) cannot double-credit.
pub struct PaymentQueueUseCase<P, U>
where
    P: PaymentRequestRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    payment_request_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> PaymentQueueUseCase<P, U>
where
    P: PaymentRequestRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(payment_request_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            payment_request_repo,
            user_repo,
        }
    }

    pub fn plans(&self) -> Vec<TopUpPlan> {
        crate::domain::value_objects::plans::TOP_UP_PLANS.to_vec()
    }

    pub async fn submit(
        &self,
        user_id: Uuid,
        plan_credits: i64,
        transaction_id: &str,
    ) -> PaymentQueueResult<PaymentRequestEntity> {
        let transaction_id = transaction_id.trim();
        if transaction_id.is_empty() {
            let err = PaymentQueueError::MissingTransactionId;
            warn!(
                %user_id,
                status = err.status_code().as_u16(),
                "payment_queue: submission without a transaction id"
            );
            return Err(err);
        }

        let Some(plan) = find_plan_by_credits(plan_credits) else {
            let err = PaymentQueueError::UnknownPlan;
            warn!(
                %user_id,
                plan_credits,
                status = err.status_code().as_u16(),
                "payment_queue: submission for a plan that is not in the catalog"
            );
            return Err(err);
        };

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(PaymentQueueError::Internal)?
            .ok_or(PaymentQueueError::UnknownUser)?;

        let request = self
            .payment_request_repo
            .insert(InsertPaymentRequestEntity {
                user_id: user.id,
                user_name: user.name,
                plan: plan.label(),
                amount: plan.price,
                credits: plan.credits,
                transaction_id: transaction_id.to_string(),
            })
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_credits,
                    store_error = ?err,
                    "payment_queue: failed to record payment request"
                );
                PaymentQueueError::Internal(err)
            })?;

        info!(
            %user_id,
            payment_id = request.id,
            plan = %request.plan,
            "payment_queue: payment request submitted"
        );
        Ok(request)
    }

    /// Applies an admin verdict. Unknown ids and already-decided requests are
    /// deliberate no-ops: the admin UI may be looking at a stale list.
    pub async fn decide(
        &self,
        payment_id: i64,
        decision: PaymentDecision,
    ) -> PaymentQueueResult<()> {
        let outcome = self
            .payment_request_repo
            .transition_from_pending(payment_id, decision.to_status())
            .await
            .map_err(PaymentQueueError::Internal)?;

        let request = match outcome {
            TransitionOutcome::NotFound => {
                warn!(payment_id, "payment_queue: decision for an unknown request");
                return Ok(());
            }
            TransitionOutcome::AlreadyDecided(request) => {
                warn!(
                    payment_id,
                    current_status = %request.status,
                    attempted = %decision,
                    "payment_queue: request was already decided, ignoring"
                );
                return Ok(());
            }
            TransitionOutcome::Applied(request) => request,
        };

        if decision == PaymentDecision::Approved {
            let credited = self
                .user_repo
                .adjust_credits(request.user_id, request.credits, CreditDirection::Add)
                .await
                .map_err(PaymentQueueError::Internal)?;

            match credited {
                Some(adjustment) => info!(
                    payment_id,
                    user_id = %request.user_id,
                    credits = request.credits,
                    balance = adjustment.user.credits,
                    "payment_queue: request approved and credits granted"
                ),
                None => warn!(
                    payment_id,
                    user_id = %request.user_id,
                    "payment_queue: approved request references a missing user"
                ),
            }
        } else {
            info!(
                payment_id,
                user_id = %request.user_id,
                "payment_queue: request rejected"
            );
        }

        Ok(())
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> PaymentQueueResult<Vec<PaymentRequestEntity>> {
        Ok(self
            .payment_request_repo
            .list_by_user(user_id)
            .await
            .map_err(PaymentQueueError::Internal)?)
    }

    pub async fn list_all(&self) -> PaymentQueueResult<Vec<PaymentRequestEntity>> {
        Ok(self
            .payment_request_repo
            .list_all()
            .await
            .map_err(PaymentQueueError::Internal)?)
    }
}
