//! Verification service: one-time codes keyed by WhatsApp number.
//!
//! Requesting a new code replaces any outstanding one for the same
//! number. A successful verify consumes the record so the code cannot be
//! replayed.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::domain::{DomainError, DomainResult, TokenStore, VerificationToken};

pub struct VerificationService {
    store: Arc<dyn TokenStore>,
}

impl VerificationService {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Issue a fresh 6-digit code for a number. Leading zeros are kept.
    pub async fn request(&self, whatsapp_number: &str) -> DomainResult<VerificationToken> {
        if whatsapp_number.is_empty() {
            return Err(DomainError::Validation(
                "WhatsApp number must not be empty".into(),
            ));
        }

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let token = VerificationToken::issue(whatsapp_number.to_string(), code);
        self.store.upsert(&token).await?;

        info!(whatsapp_number, "Verification code issued");
        Ok(token)
    }

    /// Check a submitted code and consume it on match.
    ///
    /// Unknown number and wrong code produce the same error so the
    /// response never reveals whether a code is outstanding.
    pub async fn verify(&self, whatsapp_number: &str, token: &str) -> DomainResult<()> {
        let stored = self.store.find_by_number(whatsapp_number).await?;

        let Some(stored) = stored else {
            return Err(DomainError::Unauthorized("Invalid verification code".into()));
        };
        if stored.token != token {
            return Err(DomainError::Unauthorized("Invalid verification code".into()));
        }

        self.store.delete_by_number(whatsapp_number).await?;
        info!(whatsapp_number, "Verification code accepted");
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmTokenStore;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn service() -> VerificationService {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        VerificationService::new(Arc::new(SeaOrmTokenStore::new(db)))
    }

    #[tokio::test]
    async fn request_issues_six_digit_code() {
        let svc = service().await;
        let token = svc.request("2348099990000").await.unwrap();
        assert_eq!(token.token.len(), 6);
        assert!(token.token.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn verify_consumes_the_code() {
        let svc = service().await;
        let token = svc.request("2348099990000").await.unwrap();

        svc.verify("2348099990000", &token.token).await.unwrap();

        // Second use of the same code fails.
        let err = svc.verify("2348099990000", &token.token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn new_request_replaces_outstanding_code() {
        let svc = service().await;
        let first = svc.request("2348099990000").await.unwrap();
        let second = svc.request("2348099990000").await.unwrap();

        if first.token != second.token {
            let err = svc.verify("2348099990000", &first.token).await.unwrap_err();
            assert!(matches!(err, DomainError::Unauthorized(_)));
        }
        svc.verify("2348099990000", &second.token).await.unwrap();
    }

    #[tokio::test]
    async fn failures_are_uniform() {
        let svc = service().await;
        svc.request("2348099990000").await.unwrap();

        let wrong_code = svc.verify("2348099990000", "000000").await;
        let unknown_number = svc.verify("2340000000000", "000000").await;

        // Wrong code for a known number could collide with the random
        // one; retry through another issued code if it did.
        let wrong_code = match wrong_code {
            Ok(()) => {
                let token = svc.request("2348099990000").await.unwrap();
                let bad = if token.token == "111111" { "222222" } else { "111111" };
                svc.verify("2348099990000", bad).await.unwrap_err()
            }
            Err(e) => e,
        };
        assert_eq!(
            wrong_code.to_string(),
            unknown_number.unwrap_err().to_string()
        );
    }
}
