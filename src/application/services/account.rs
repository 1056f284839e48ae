//! Account service: registration, login and user-level CRUD.
//!
//! All credential handling lives here. HTTP handlers are thin wrappers
//! that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RegisterUser, User, UserStore};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: String,
}

pub struct AccountService {
    store: Arc<dyn UserStore>,
    jwt_config: JwtConfig,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, jwt_config: JwtConfig) -> Self {
        Self { store, jwt_config }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new account with empty groups and communities.
    ///
    /// The email pre-check gives a friendly Conflict; the unique index on
    /// the email column backstops the race two concurrent registrations
    /// would otherwise win together.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        if input.name.is_empty() {
            return Err(DomainError::Validation("Name must not be empty".into()));
        }
        if input.password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if !input.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "User with email {} already exists",
                input.email
            )));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let user = User::register(
            input.name,
            input.whatsapp_number,
            input.email,
            password_hash,
        );
        self.store.insert(&user).await?;

        info!(user_id = %user.id, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    ///
    /// Unknown email and wrong password produce the same error so the
    /// response never reveals whether an account exists.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self.store.find_by_email(email).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user.id, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user_id: user.id,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", id))
    }

    /// Every registered user. Unbounded by design.
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.store.list().await
    }

    // ── Commands ────────────────────────────────────────────────

    /// Delete a user and everything embedded in the aggregate.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.store.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
