//! Persistence interface for the user aggregate.

use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::user::model::User;

/// Store for whole user aggregates.
///
/// The aggregate is always read and written as one unit. `save` is
/// version-guarded: it only succeeds when the row still carries
/// `user.version`, and bumps the in-memory version on success. A stale
/// write fails with `DomainError::ConcurrentModification` so the caller
/// can re-read and re-apply.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new aggregate. Fails with Conflict on a duplicate email.
    async fn insert(&self, user: &User) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Every registered user. Unbounded by design.
    async fn list(&self) -> DomainResult<Vec<User>>;

    /// Write the whole aggregate back, guarded by `user.version`.
    async fn save(&self, user: &mut User) -> DomainResult<()>;

    /// Delete the aggregate and everything embedded in it.
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
