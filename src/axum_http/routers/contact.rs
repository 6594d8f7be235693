use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Serialize;

use crate::{
    axum_http::error_responses::error_response,
    config::config_model::DotEnvyConfig,
    domain::value_objects::contact::ContactMessage,
    infrastructure::formspree::formspree_client::FormspreeClient,
    usecases::contact::{ContactGateway, ContactUseCase},
};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn routes(config: Arc<DotEnvyConfig>) -> Router {
    let formspree_client = Arc::new(FormspreeClient::new(config.formspree.endpoint.clone()));
    let contact_usecase = Arc::new(ContactUseCase::new(formspree_client));

    Router::new()
        .route("/", post(submit))
        .with_state(contact_usecase)
}

pub async fn submit<C>(
    State(contact_usecase): State<Arc<ContactUseCase<C>>>,
    Json(body): Json<ContactMessage>,
) -> impl IntoResponse
where
    C: ContactGateway + Send + Sync + 'static,
{
    match contact_usecase.submit(body).await {
        Ok(()) => Json(MessageResponse {
            message: "Thank you for your message! We'll get back to you soon.".to_string(),
        })
        .into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
