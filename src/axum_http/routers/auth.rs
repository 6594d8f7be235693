use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    axum_http::error_responses::error_response,
    domain::repositories::users::UserRepository,
    infrastructure::memory::{memory_store::MemoryStore, repositories::users::UserMemory},
    usecases::auth::{AuthUseCase, SessionGate},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes(store: Arc<MemoryStore>, session: Arc<SessionGate>) -> Router {
    let user_repository = UserMemory::new(Arc::clone(&store));
    let auth_usecase = AuthUseCase::new(Arc::new(user_repository), session);

    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(Arc::new(auth_usecase))
}

pub async fn login<U>(
    State(auth_usecase): State<Arc<AuthUseCase<U>>>,
    Json(body): Json<LoginRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match auth_usecase.login(&body.email, &body.password).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn signup<U>(
    State(auth_usecase): State<Arc<AuthUseCase<U>>>,
    Json(body): Json<SignupRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match auth_usecase
        .signup(&body.name, &body.email, &body.password)
        .await
    {
        Ok(_) => Json(MessageResponse {
            message: "Signup successful! Please log in.".to_string(),
        })
        .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn logout<U>(State(auth_usecase): State<Arc<AuthUseCase<U>>>) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    auth_usecase.logout().await;
    Json(MessageResponse {
        message: "Logged out.".to_string(),
    })
    .into_response()
}

pub async fn me<U>(State(auth_usecase): State<Arc<AuthUseCase<U>>>) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
{
    match auth_usecase.current_user().await {
        Ok(user) => Json(user).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
