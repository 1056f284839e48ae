//! Application services
//!
//! Use-case orchestration over the domain stores. The nested-collection
//! mutators all follow the same shape: load the whole aggregate, apply
//! the change in memory, write the whole aggregate back under the version
//! guard, and retry from a fresh read when the write was stale.

pub mod account;
pub mod community;
pub mod group;
pub mod verification;

pub use account::{AccountService, AuthResult};
pub use community::CommunityService;
pub use group::GroupService;
pub use verification::VerificationService;

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, User, UserStore};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Load the aggregate for a read-only operation.
pub(crate) async fn load_user(
    store: &Arc<dyn UserStore>,
    user_id: &str,
) -> DomainResult<User> {
    store
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("user", user_id))
}

/// Read-modify-write of one user aggregate with optimistic retry.
///
/// `apply` runs against a freshly loaded aggregate on every attempt, so a
/// retried mutation is re-applied on top of whatever the concurrent
/// writer persisted, so concurrent appends against the same user are never
/// lost. Errors other than a stale write bail immediately.
pub(crate) async fn mutate_user<T>(
    store: &Arc<dyn UserStore>,
    retry: &RetryConfig,
    user_id: &str,
    op_name: &'static str,
    apply: impl Fn(&mut User) -> DomainResult<T>,
) -> DomainResult<T> {
    retry_with_backoff(
        retry.clone(),
        || async {
            let mut user = store
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| DomainError::not_found("user", user_id))?;
            let out = apply(&mut user)?;
            store.save(&mut user).await?;
            Ok(out)
        },
        DomainError::is_stale_write,
        op_name,
    )
    .await
}
