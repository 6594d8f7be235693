use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    axum_http::error_responses::error_response,
    domain::repositories::{payment_requests::PaymentRequestRepository, users::UserRepository},
    infrastructure::memory::{
        memory_store::MemoryStore,
        repositories::{payment_requests::PaymentRequestMemory, users::UserMemory},
    },
    usecases::{
        auth::{AuthUseCase, SessionGate},
        payment_queue::PaymentQueueUseCase,
    },
};

#[derive(Debug, Deserialize)]
pub struct SubmitPaymentRequest {
    pub plan_credits: i64,
    pub transaction_id: String,
}

pub fn routes(store: Arc<MemoryStore>, session: Arc<SessionGate>) -> Router {
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));
    let payment_request_repository = Arc::new(PaymentRequestMemory::new(Arc::clone(&store)));

    let auth_usecase = Arc::new(AuthUseCase::new(Arc::clone(&user_repository), session));
    let payment_queue_usecase = Arc::new(PaymentQueueUseCase::new(
        payment_request_repository,
        user_repository,
    ));

    Router::new()
        .route("/plans", get(plans))
        .route("/requests", post(submit).get(list_own))
        .with_state((auth_usecase, payment_queue_usecase))
}

pub async fn plans<U, P>(
    State((_, payment_queue_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
    )>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    Json(payment_queue_usecase.plans()).into_response()
}

pub async fn submit<U, P>(
    State((auth_usecase, payment_queue_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
    )>,
    Json(body): Json<SubmitPaymentRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    let user = match auth_usecase.current_user().await {
        Ok(user) => user,
        Err(err) => return error_response(err.status_code(), err.to_string()),
    };

    match payment_queue_usecase
        .submit(user.id, body.plan_credits, &body.transaction_id)
        .await
    {
        Ok(request) => Json(request).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn list_own<U, P>(
    State((auth_usecase, payment_queue_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<PaymentQueueUseCase<P, U>>,
    )>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PaymentRequestRepository + Send + Sync + 'static,
{
    let user = match auth_usecase.current_user().await {
        Ok(user) => user,
        Err(err) => return error_response(err.status_code(), err.to_string()),
    };

    match payment_queue_usecase.list_for_user(user.id).await {
        Ok(requests) => Json(requests).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
