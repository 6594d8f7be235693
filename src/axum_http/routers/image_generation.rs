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
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{generations::GenerationRepository, users::UserRepository},
        value_objects::generations::InputImage,
    },
    infrastructure::{
        gemini::gemini_client::GeminiClient,
        memory::{
            memory_store::MemoryStore,
            repositories::{generations::GenerationMemory, users::UserMemory},
        },
    },
    usecases::{
        auth::{AuthUseCase, SessionGate},
        image_generation::{ImageGenerationGateway, ImageGenerationUseCase},
    },
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub input_images: Vec<InputImage>,
}

fn default_count() -> u32 {
    1
}

pub fn routes(
    store: Arc<MemoryStore>,
    session: Arc<SessionGate>,
    config: Arc<DotEnvyConfig>,
) -> Router {
    let user_repository = Arc::new(UserMemory::new(Arc::clone(&store)));
    let generation_repository = Arc::new(GenerationMemory::new(Arc::clone(&store)));
    let gemini_client = Arc::new(GeminiClient::new(
        config.gemini.api_key.clone(),
        config.gemini.base_url.clone(),
    ));

    let auth_usecase = Arc::new(AuthUseCase::new(Arc::clone(&user_repository), session));
    let generation_usecase = Arc::new(ImageGenerationUseCase::new(
        user_repository,
        generation_repository,
        gemini_client,
    ));

    Router::new()
        .route("/", post(generate))
        .route("/history", get(history))
        .with_state((auth_usecase, generation_usecase))
}

pub async fn generate<U, G, Gw>(
    State((auth_usecase, generation_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<ImageGenerationUseCase<U, G, Gw>>,
    )>,
    Json(body): Json<GenerateRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    Gw: ImageGenerationGateway + Send + Sync + 'static,
{
    let user = match auth_usecase.current_user().await {
        Ok(user) => user,
        Err(err) => return error_response(err.status_code(), err.to_string()),
    };

    match generation_usecase
        .generate(user.id, &body.prompt, body.count, body.input_images)
        .await
    {
        Ok(generation) => Json(generation).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}

pub async fn history<U, G, Gw>(
    State((auth_usecase, generation_usecase)): State<(
        Arc<AuthUseCase<U>>,
        Arc<ImageGenerationUseCase<U, G, Gw>>,
    )>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    Gw: ImageGenerationGateway + Send + Sync + 'static,
{
    let user = match auth_usecase.current_user().await {
        Ok(user) => user,
        Err(err) => return error_response(err.status_code(), err.to_string()),
    };

    match generation_usecase.history(user.id).await {
        Ok(generations) => Json(generations).into_response(),
        Err(err) => error_response(err.status_code(), err.to_string()),
    }
}
