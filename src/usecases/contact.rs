use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    domain::value_objects::contact::ContactMessage,
    infrastructure::formspree::formspree_client::FormspreeClient,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn submit(&self, message: ContactMessage) -> AnyResult<()>;
}

#[async_trait]
impl ContactGateway for FormspreeClient {
    async fn submit(&self, message: ContactMessage) -> AnyResult<()> {
        self.submit(&message).await
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("please fill out all fields")]
    MissingField,
    #[error("an error occurred while sending your message")]
    SubmissionFailed(#[source] anyhow::Error),
}

impl ContactError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ContactError::MissingField => StatusCode::BAD_REQUEST,
            ContactError::SubmissionFailed(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

pub type ContactResult<T> = std::result::Result<T, ContactError>;

/// Forwards contact messages to the external form endpoint. Nothing is
/// retried and nothing is stored; a failure is only reported back.
pub struct ContactUseCase<C>
where
    C: ContactGateway + Send + Sync + 'static,
{
    gateway: Arc<C>,
}

impl<C> ContactUseCase<C>
where
    C: ContactGateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<C>) -> Self {
        Self { gateway }
    }

    pub async fn submit(&self, message: ContactMessage) -> ContactResult<()> {
        if message.name.trim().is_empty()
            || message.email.trim().is_empty()
            || message.subject.trim().is_empty()
            || message.message.trim().is_empty()
        {
            let err = ContactError::MissingField;
            warn!(
                status = err.status_code().as_u16(),
                "contact: incomplete form submission"
            );
            return Err(err);
        }

        self.gateway
            .submit(message)
            .await
            .map_err(ContactError::SubmissionFailed)?;

        info!("contact: message forwarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, message: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: "someone@example.com".to_string(),
            subject: "Hello".to_string(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn complete_messages_are_forwarded() {
        let mut gateway = MockContactGateway::new();
        gateway.expect_submit().times(1).returning(|_| Ok(()));

        let usecase = ContactUseCase::new(Arc::new(gateway));
        usecase.submit(message("Someone", "Hi there")).await.unwrap();
    }

    #[tokio::test]
    async fn incomplete_messages_never_reach_the_gateway() {
        // No submit expectation: a call would fail the test.
        let usecase = ContactUseCase::new(Arc::new(MockContactGateway::new()));

        let result = usecase.submit(message("", "Hi there")).await;
        assert!(matches!(result, Err(ContactError::MissingField)));

        let result = usecase.submit(message("Someone", "  ")).await;
        assert!(matches!(result, Err(ContactError::MissingField)));
    }

    #[tokio::test]
    async fn gateway_failures_surface_as_submission_errors() {
        let mut gateway = MockContactGateway::new();
        gateway
            .expect_submit()
            .returning(|_| Err(anyhow::anyhow!("endpoint unreachable")));

        let usecase = ContactUseCase::new(Arc::new(gateway));
        let result = usecase.submit(message("Someone", "Hi")).await;
        assert!(matches!(result, Err(ContactError::SubmissionFailed(_))));
    }
}
