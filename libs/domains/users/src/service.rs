use axum_helpers::TokenService;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, SignupRequest, User, normalize_email};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Service layer for signup and login
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: TokenService,
    admin_emails: Arc<HashSet<String>>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            tokens: self.tokens.clone(),
            admin_emails: Arc::clone(&self.admin_emails),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, tokens: TokenService) -> Self {
        Self {
            repository: Arc::new(repository),
            tokens,
            admin_emails: Arc::new(HashSet::new()),
        }
    }

    /// Accounts created with one of these emails are administrators.
    pub fn with_admin_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| normalize_email(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self.admin_emails = Arc::new(emails);
        self
    }

    /// Register a new account and sign a token for it.
    #[instrument(skip(self, input))]
    pub async fn signup(&self, input: SignupRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&input.email);

        if self.repository.email_exists(&email).await? {
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(input.password.clone()).await?;
        let is_admin = self.admin_emails.contains(&email);
        let user = User::new(input, password_hash, is_admin);

        let user = self.repository.create(user).await.map_err(|e| match e {
            UserError::Store(msg) => {
                tracing::warn!(error = %msg, "User insert rejected by store");
                UserError::InvalidData(msg)
            }
            other => other,
        })?;

        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User signed up");
        self.authenticate(user)
    }

    /// Check credentials and sign a token.
    ///
    /// An unknown email and a wrong password are reported differently.
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&input.email);

        let user = self
            .repository
            .get_by_email(&email)
            .await?
            .ok_or(UserError::EmailNotFound(email))?;

        if !verify_password(input.password, user.password_hash.clone()).await? {
            tracing::info!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        self.authenticate(user)
    }

    fn authenticate(&self, user: User) -> UserResult<AuthResponse> {
        let token = self.tokens.issue(user.id, user.is_admin)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}
