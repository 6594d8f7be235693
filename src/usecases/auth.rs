use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    repositories::users::UserRepository,
    value_objects::enums::user_roles::UserRole,
};

/// New accounts start with this many credits.
pub const SIGNUP_CREDITS: i64 = 10;

/// The single-process session: one logical actor, so the session is just a
/// pointer to a user id. Reads always resolve through the repository, which
/// keeps the session view and the canonical record from diverging.
pub struct SessionGate {
    current: RwLock<Option<Uuid>>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    pub async fn set(&self, user_id: Uuid) {
        *self.current.write().await = Some(user_id);
    }

    pub async fn clear(&self) {
        *self.current.write().await = None;
    }

    pub async fn current(&self) -> Option<Uuid> {
        *self.current.read().await
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("you must be logged in")]
    Unauthenticated,
    #[error("access denied")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateAccount => StatusCode::CONFLICT,
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Login, signup and the session gate. Passwords are opaque plaintext
/// comparison strings by design — this is a demo store, not an identity
/// system.
pub struct AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    session: Arc<SessionGate>,
}

impl<U> AuthUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, session: Arc<SessionGate>) -> Self {
        Self { user_repo, session }
    }

    /// Case-insensitive email match plus exact password match. A failed login
    /// leaves the session untouched.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<UserEntity> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(AuthError::Internal)?;

        match user {
            Some(user) if user.password == password => {
                self.session.set(user.id).await;
                info!(user_id = %user.id, role = %user.role, "auth: login succeeded");
                Ok(user)
            }
            _ => {
                let err = AuthError::InvalidCredentials;
                warn!(
                    status = err.status_code().as_u16(),
                    "auth: login failed"
                );
                Err(err)
            }
        }
    }

    /// Creates a user-role account with the starting credit grant. Does not
    /// log the new account in — the caller goes through `login` separately.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> AuthResult<UserEntity> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        let existing = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(AuthError::Internal)?;
        if existing.is_some() {
            let err = AuthError::DuplicateAccount;
            warn!(
                status = err.status_code().as_u16(),
                "auth: signup with an already-registered email"
            );
            return Err(err);
        }

        let user = self
            .user_repo
            .insert(InsertUserEntity {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                credits: SIGNUP_CREDITS,
                role: UserRole::User,
            })
            .await
            .map_err(AuthError::Internal)?;

        info!(user_id = %user.id, "auth: account created");
        Ok(user)
    }

    pub async fn logout(&self) {
        self.session.clear().await;
        info!("auth: session cleared");
    }

    /// Resolves the session pointer through the repository. A dangling
    /// pointer (user record gone) reads as unauthenticated.
    pub async fn current_user(&self) -> AuthResult<UserEntity> {
        let Some(user_id) = self.session.current().await else {
            return Err(AuthError::Unauthenticated);
        };

        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(AuthError::Internal)?
            .ok_or(AuthError::Unauthenticated)
    }

    pub async fn require_admin(&self) -> AuthResult<UserEntity> {
        let user = self.current_user().await?;
        if user.role != UserRole::Admin {
            let err = AuthError::Forbidden;
            warn!(
                user_id = %user.id,
                status = err.status_code().as_u16(),
                "auth: admin route refused for non-admin user"
            );
            return Err(err);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::users::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_user(email: &str, password: &str, role: UserRole) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            name: "Sample".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            credits: 25,
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn login_matches_email_case_insensitively_and_sets_the_session() {
        let mut user_repo = MockUserRepository::new();
        let stored = sample_user("user@example.com", "user", UserRole::User);
        let stored_id = stored.id;

        user_repo
            .expect_find_by_email()
            .with(eq("USER@Example.COM"))
            .returning(move |_| Ok(Some(stored.clone())));

        let session = Arc::new(SessionGate::new());
        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::clone(&session));

        let user = usecase.login("USER@Example.COM", "user").await.unwrap();
        assert_eq!(user.id, stored_id);
        assert_eq!(session.current().await, Some(stored_id));
    }

    #[tokio::test]
    async fn wrong_password_fails_and_leaves_the_session_anonymous() {
        let mut user_repo = MockUserRepository::new();
        let stored = sample_user("user@example.com", "user", UserRole::User);

        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let session = Arc::new(SessionGate::new());
        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::clone(&session));

        let result = usecase.login("user@example.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(session.current().await, None);
    }

    #[tokio::test]
    async fn signup_grants_ten_credits_and_does_not_auto_login() {
        let mut user_repo = MockUserRepository::new();

        user_repo
            .expect_find_by_email()
            .with(eq("new@example.com"))
            .returning(|_| Ok(None));
        user_repo
            .expect_insert()
            .withf(|insert| {
                insert.credits == SIGNUP_CREDITS
                    && insert.role == UserRole::User
                    && insert.email == "new@example.com"
            })
            .times(1)
            .returning(|insert| {
                Ok(UserEntity {
                    id: Uuid::new_v4(),
                    name: insert.name,
                    email: insert.email,
                    password: insert.password,
                    credits: insert.credits,
                    role: insert.role,
                    created_at: Utc::now(),
                })
            });

        let session = Arc::new(SessionGate::new());
        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::clone(&session));

        let user = usecase
            .signup("Newcomer", "new@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(user.credits, SIGNUP_CREDITS);
        assert_eq!(session.current().await, None);
    }

    #[tokio::test]
    async fn signup_with_a_registered_email_fails_without_creating_anything() {
        let mut user_repo = MockUserRepository::new();
        let stored = sample_user("taken@example.com", "pw", UserRole::User);

        // insert is not expected: a call would fail the test.
        user_repo
            .expect_find_by_email()
            .with(eq("TAKEN@example.com"))
            .returning(move |_| Ok(Some(stored.clone())));

        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::new(SessionGate::new()));

        let result = usecase.signup("Other", "TAKEN@example.com", "pw2").await;
        assert!(matches!(result, Err(AuthError::DuplicateAccount)));
    }

    #[tokio::test]
    async fn signup_requires_every_field() {
        let usecase = AuthUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(SessionGate::new()),
        );

        assert!(matches!(
            usecase.signup("", "a@b.c", "pw").await,
            Err(AuthError::MissingField("name"))
        ));
        assert!(matches!(
            usecase.signup("A", "", "pw").await,
            Err(AuthError::MissingField("email"))
        ));
        assert!(matches!(
            usecase.signup("A", "a@b.c", "").await,
            Err(AuthError::MissingField("password"))
        ));
    }

    #[tokio::test]
    async fn logout_returns_the_session_to_anonymous() {
        let mut user_repo = MockUserRepository::new();
        let stored = sample_user("user@example.com", "user", UserRole::User);

        user_repo
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let session = Arc::new(SessionGate::new());
        let usecase = AuthUseCase::new(Arc::new(user_repo), Arc::clone(&session));

        usecase.login("user@example.com", "user").await.unwrap();
        usecase.logout().await;
        assert_eq!(session.current().await, None);

        let result = usecase.current_user().await;
        assert!(matches!(result, Err(AuthError::Unauthenticated)));
    }

    #[tokio::test]
    async fn admin_gate_refuses_regular_users() {
        let mut user_repo = MockUserRepository::new();
        let stored = sample_user("user@example.com", "user", UserRole::User);
        let stored_id = stored.id;

        user_repo
            .expect_find_by_id()
            .with(eq(stored_id))
            .returning(move |_| Ok(Some(stored.clone())));

        let session = Arc::new(SessionGate::new());
        session.set(stored_id).await;
        let usecase = AuthUseCase::new(Arc::new(user_repo), session);

        let result = usecase.require_admin().await;
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }
}
