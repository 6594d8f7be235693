use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        entities::generations::{GenerationEntity, InsertGenerationEntity},
        repositories::{generations::GenerationRepository, users::UserRepository},
        value_objects::{
            enums::credit_directions::CreditDirection, generations::InputImage,
        },
    },
    infrastructure::gemini::gemini_client::GeminiClient,
};

/// One image costs one credit.
pub const CREDITS_PER_IMAGE: i64 = 1;
pub const MAX_IMAGES_PER_REQUEST: u32 = 3;
pub const MAX_INPUT_IMAGES: usize = 3;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerationGateway: Send + Sync {
    async fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        input_images: Vec<InputImage>,
    ) -> AnyResult<Vec<String>>;
}

#[async_trait]
impl ImageGenerationGateway for GeminiClient {
    async fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        input_images: Vec<InputImage>,
    ) -> AnyResult<Vec<String>> {
        self.generate_images(prompt, count, &input_images).await
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("please enter a prompt")]
    MissingPrompt,
    #[error("number of images must be between 1 and {MAX_IMAGES_PER_REQUEST}")]
    InvalidImageCount,
    #[error("up to {MAX_INPUT_IMAGES} product images are allowed")]
    TooManyInputImages,
    #[error(
        "you need {needed} credit(s) to generate, but you only have {available}; please purchase more"
    )]
    InsufficientCredits { needed: i64, available: i64 },
    #[error("user not found")]
    UnknownUser,
    #[error("failed to generate images, please try again")]
    GenerationFailed(#[source] anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GenerationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            GenerationError::MissingPrompt
            | GenerationError::InvalidImageCount
            | GenerationError::TooManyInputImages => StatusCode::BAD_REQUEST,
            GenerationError::InsufficientCredits { .. } => StatusCode::PAYMENT_REQUIRED,
            GenerationError::UnknownUser => StatusCode::NOT_FOUND,
            GenerationError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            GenerationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// The paid generation flow. Order matters: validate, pre-check credits, call
/// the external API, and only then deduct and record — a failed call must
/// leave both the balance and the history untouched.
pub struct ImageGenerationUseCase<U, G, Gw>
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    Gw: ImageGenerationGateway + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    generation_repo: Arc<G>,
    gateway: Arc<Gw>,
}

impl<U, G, Gw> ImageGenerationUseCase<U, G, Gw>
where
    U: UserRepository + Send + Sync + 'static,
    G: GenerationRepository + Send + Sync + 'static,
    Gw: ImageGenerationGateway + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, generation_repo: Arc<G>, gateway: Arc<Gw>) -> Self {
        Self {
            user_repo,
            generation_repo,
            gateway,
        }
    }

    pub async fn generate(
        &self,
        user_id: Uuid,
        prompt: &str,
        count: u32,
        input_images: Vec<InputImage>,
    ) -> GenerationResult<GenerationEntity> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::MissingPrompt);
        }
        if count == 0 || count > MAX_IMAGES_PER_REQUEST {
            return Err(GenerationError::InvalidImageCount);
        }
        if input_images.len() > MAX_INPUT_IMAGES {
            return Err(GenerationError::TooManyInputImages);
        }

        let cost = CREDITS_PER_IMAGE * i64::from(count);

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(GenerationError::Internal)?
            .ok_or(GenerationError::UnknownUser)?;

        if user.credits < cost {
            let err = GenerationError::InsufficientCredits {
                needed: cost,
                available: user.credits,
            };
            warn!(
                %user_id,
                cost,
                available = user.credits,
                status = err.status_code().as_u16(),
                "image_generation: blocked before the external call, balance too low"
            );
            return Err(err);
        }

        info!(
            %user_id,
            count,
            input_images = input_images.len(),
            prompt_len = prompt.len(),
            "image_generation: calling generation API"
        );

        let images = self
            .gateway
            .generate_images(prompt, count, input_images)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    count,
                    error = ?err,
                    "image_generation: external call failed, no credits were deducted"
                );
                GenerationError::GenerationFailed(err)
            })?;

        // Deduction cannot clamp here: sufficiency was checked above and this
        // process is the only writer for this command.
        self.user_repo
            .adjust_credits(user_id, cost, CreditDirection::Deduct)
            .await
            .map_err(GenerationError::Internal)?;

        let generation = self
            .generation_repo
            .insert(InsertGenerationEntity {
                user_id,
                prompt: prompt.to_string(),
                images,
            })
            .await
            .map_err(GenerationError::Internal)?;

        info!(
            %user_id,
            generation_id = generation.id,
            images = generation.images.len(),
            cost,
            "image_generation: generation recorded"
        );
        Ok(generation)
    }

    pub async fn history(&self, user_id: Uuid) -> GenerationResult<Vec<GenerationEntity>> {
        Ok(self
            .generation_repo
            .list_by_user(user_id)
            .await
            .map_err(GenerationError::Internal)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::users::UserEntity,
        repositories::{generations::MockGenerationRepository, users::MockUserRepository},
        value_objects::{credits::CreditAdjustment, enums::user_roles::UserRole},
    };
    use anyhow::anyhow;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_user(id: Uuid, credits: i64) -> UserEntity {
        UserEntity {
            id,
            name: "User".to_string(),
            email: "user@example.com".to_string(),
            password: "user".to_string(),
            credits,
            role: UserRole::User,
            created_at: Utc::now(),
        }
    }

    fn data_urls(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("data:image/jpeg;base64,img{}", i))
            .collect()
    }

    #[tokio::test]
    async fn successful_generation_deducts_cost_and_records_one_entry() {
        let user_id = Uuid::new_v4();
        let mut user_repo = MockUserRepository::new();
        let mut generation_repo = MockGenerationRepository::new();
        let mut gateway = MockImageGenerationGateway::new();

        user_repo
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |id| Ok(Some(sample_user(id, 25))));

        gateway
            .expect_generate_images()
            .times(1)
            .returning(|_, count, _| Ok(data_urls(count as usize)));

        user_repo
            .expect_adjust_credits()
            .with(eq(user_id), eq(3), eq(CreditDirection::Deduct))
            .times(1)
            .returning(move |id, _, _| {
                Ok(Some(CreditAdjustment {
                    user: sample_user(id, 22),
                    clamped: false,
                }))
            });

        generation_repo
            .expect_insert()
            .withf(move |insert| insert.user_id == user_id && insert.images.len() == 3)
            .times(1)
            .returning(|insert| {
                Ok(GenerationEntity {
                    id: 1,
                    user_id: insert.user_id,
                    prompt: insert.prompt,
                    images: insert.images,
                    timestamp: Utc::now(),
                })
            });

        let usecase = ImageGenerationUseCase::new(
            Arc::new(user_repo),
            Arc::new(generation_repo),
            Arc::new(gateway),
        );

        let generation = usecase
            .generate(user_id, "a model trying on this shirt", 3, Vec::new())
            .await
            .unwrap();

        assert_eq!(generation.images.len(), 3);
    }

    #[tokio::test]
    async fn insufficient_credits_block_before_any_external_call() {
        let user_id = Uuid::new_v4();
        let mut user_repo = MockUserRepository::new();
        // No gateway/insert/adjust expectations: any call fails the test.
        let generation_repo = MockGenerationRepository::new();
        let gateway = MockImageGenerationGateway::new();

        user_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_user(id, 2))));

        let usecase = ImageGenerationUseCase::new(
            Arc::new(user_repo),
            Arc::new(generation_repo),
            Arc::new(gateway),
        );

        let result = usecase
            .generate(user_id, "a jacket on a model", 3, Vec::new())
            .await;

        match result {
            Err(GenerationError::InsufficientCredits { needed, available }) => {
                assert_eq!(needed, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientCredits, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn failed_external_call_leaves_credits_and_history_untouched() {
        let user_id = Uuid::new_v4();
        let mut user_repo = MockUserRepository::new();
        let generation_repo = MockGenerationRepository::new();
        let mut gateway = MockImageGenerationGateway::new();

        user_repo
            .expect_find_by_id()
            .returning(move |id| Ok(Some(sample_user(id, 25))));
        // adjust_credits is deliberately not expected.

        gateway
            .expect_generate_images()
            .times(1)
            .returning(|_, _, _| Err(anyhow!("model overloaded")));

        let usecase = ImageGenerationUseCase::new(
            Arc::new(user_repo),
            Arc::new(generation_repo),
            Arc::new(gateway),
        );

        let result = usecase.generate(user_id, "a hat", 1, Vec::new()).await;
        assert!(matches!(result, Err(GenerationError::GenerationFailed(_))));
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_up_front() {
        let usecase = ImageGenerationUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockGenerationRepository::new()),
            Arc::new(MockImageGenerationGateway::new()),
        );

        let result = usecase.generate(Uuid::new_v4(), "  ", 1, Vec::new()).await;
        assert!(matches!(result, Err(GenerationError::MissingPrompt)));
    }

    #[tokio::test]
    async fn image_count_outside_one_to_three_is_rejected() {
        let usecase = ImageGenerationUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockGenerationRepository::new()),
            Arc::new(MockImageGenerationGateway::new()),
        );

        for count in [0, 4] {
            let result = usecase
                .generate(Uuid::new_v4(), "a shirt", count, Vec::new())
                .await;
            assert!(matches!(result, Err(GenerationError::InvalidImageCount)));
        }
    }

    #[tokio::test]
    async fn more_than_three_input_images_are_rejected() {
        let usecase = ImageGenerationUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockGenerationRepository::new()),
            Arc::new(MockImageGenerationGateway::new()),
        );

        let inputs = (0..4)
            .map(|i| InputImage {
                mime_type: "image/png".to_string(),
                data_base64: format!("aW1n{}", i),
            })
            .collect();

        let result = usecase
            .generate(Uuid::new_v4(), "a shirt", 1, inputs)
            .await;
        assert!(matches!(result, Err(GenerationError::TooManyInputImages)));
    }
}
