use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::users::UserEntity,
    repositories::users::UserRepository,
    value_objects::enums::credit_directions::CreditDirection,
};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LedgerError::InvalidAmount => StatusCode::BAD_REQUEST,
            LedgerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Admin-facing credit management over the user store. Deductions floor at
/// zero rather than failing; a clamp is logged but not an error, matching the
/// single mutation path the storefront has always had.
pub struct CreditLedgerUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
}

impl<U> CreditLedgerUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Applies a manual credit adjustment. An unknown user is a logged no-op
    /// (`Ok(None)`), not an error.
    pub async fn adjust_credits(
        &self,
        user_id: Uuid,
        amount: i64,
        direction: CreditDirection,
    ) -> LedgerResult<Option<UserEntity>> {
        if amount <= 0 {
            let err = LedgerError::InvalidAmount;
            warn!(
                %user_id,
                amount,
                status = err.status_code().as_u16(),
                "credit_ledger: rejected non-positive adjustment"
            );
            return Err(err);
        }

        let adjusted = self
            .user_repo
            .adjust_credits(user_id, amount, direction)
            .await
            .map_err(LedgerError::Internal)?;

        match adjusted {
            None => {
                warn!(%user_id, "credit_ledger: adjustment targeted an unknown user");
                Ok(None)
            }
            Some(adjustment) => {
                if adjustment.clamped {
                    warn!(
                        %user_id,
                        amount,
                        balance = adjustment.user.credits,
                        "credit_ledger: deduction exceeded balance, floored at zero"
                    );
                }
                info!(
                    %user_id,
                    amount,
                    direction = %direction,
                    balance = adjustment.user.credits,
                    "credit_ledger: credits adjusted"
                );
                Ok(Some(adjustment.user))
            }
        }
    }

    pub async fn list_users(&self) -> LedgerResult<Vec<UserEntity>> {
        Ok(self.user_repo.list_all().await.map_err(LedgerError::Internal)?)
    }
}
