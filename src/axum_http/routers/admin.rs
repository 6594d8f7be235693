use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    axum_http::error_responses::error_response,
    domain::{
        repositories::{payment_requests::PaymentRequestRepository, users::UserRepository},
        value_objects::enums::{
            credit_directions::CreditDirection, payment_decisions::PaymentDecision,
        },
    },
    infrastructure::memory::{
        memory_store::MemoryStore,
        repositories::{payment_requests::PaymentRequestMemory, users::UserMemory},
    },
    usecases::{
        auth::{AuthUseCase, SessionGate},
        credit_ledger::CreditLedgerUseCase,
        payment_queue::PaymentQueueUseCase,
    },
};

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: PaymentDecision,
}

#[derive(Debug, Deserialize)]
pub struct CreditAdjustmentRequest {
    pub amount: i64,
    pub direction: CreditDirection,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes(store: Arc<MemoryStore>, session: Arc<SessionGate>) -> Router {
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));
    let payment_request_repository = Arc::new(PaymentRequestMemory::new(Arc::clone(&store)));

    let auth_usecase = Arc::new(AuthUseCase::new(Arc::clone(&user_repository), session));
    let payment_queue_usecase = Arc::new(PaymentQueueUseCase::new(
        payment_request_repository,
        Arc::clone(&user_repository),
    ));
    let credit_ledger_usecase = Arc::new(CreditLedgerUseCase::new(user_repository));

    Router::new()
        .route("/users", get(list_users))
        .route("/payments", get(list_payments))
        .route("/payments/:payment_id/decision", post(decide_payment))
        .route("/users/:user_id/credits", post(adjust_credits))
        .with_state((auth_usecase, payment_queue_usecase, credit_ledger_usecase))
}

pub async fn list_users<U, P>(
    State((auth_usecase, _, credit_ledger_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
        Arc<CreditLedgerUseCase<U>>,
    )>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    if let Err(err) = auth_usecase.require_admin().await {
        return error_response(err.status_code(), err.to_string());
    }

    match credit_ledger_usecase.list_users().await {
        Ok(users) => Json(users).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_payments<U, P>(
    State((auth_usecase, payment_queue_usecase, _)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
        Arc<CreditLedgerUseCase<U>>,
    )>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    if let Err(err) = auth_usecase.require_admin().await {
        return error_response(err.status_code(), err.to_string());
    }

    match payment_queue_usecase.list_all().await {
        Ok(requests) => Json(requests).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn decide_payment<U, P>(
    State((auth_usecase, payment_queue_usecase, _)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
        Arc<CreditLedgerUseCase<U>>,
    )>,
    Path(payment_id): Path<i64>,
    Json(body): Json<DecisionRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    if let Err(err) = auth_usecase.require_admin().await {
        return error_response(err.status_code(), err.to_string());
    }

    match payment_queue_usecase.decide(payment_id, body.decision).await {
        Ok(()) => Json(MessageResponse {
            message: format!("payment request {} processed", payment_id),
        })
        .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn adjust_credits<U, P>(
    State((auth_usecase, _, credit_ledger_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
        Arc<CreditLedgerUseCase<U>>,
    )>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreditAdjustmentRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    if let Err(err) = auth_usecase.require_admin().await {
        return error_response(err.status_code(), err.to_string());
    }

    match credit_ledger_usecase
        .adjust_credits(user_id, body.amount, body.direction)
        .await
    {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => Json(MessageResponse {
            message: "no matching user, nothing changed".to_string(),
        })
        .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
