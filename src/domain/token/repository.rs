//! Persistence interface for verification tokens.

use async_trait::async_trait;

use crate::domain::error::DomainResult;
use crate::domain::token::model::VerificationToken;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Store a token for a number, replacing any previous one.
    async fn upsert(&self, token: &VerificationToken) -> DomainResult<()>;

    async fn find_by_number(&self, whatsapp_number: &str)
        -> DomainResult<Option<VerificationToken>>;

    /// Remove the record once consumed. Missing records are fine.
    async fn delete_by_number(&self, whatsapp_number: &str) -> DomainResult<()>;
}
