//! SeaORM-backed verification token store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::domain::{DomainError, DomainResult, TokenStore, VerificationToken};
use crate::infrastructure::database::entities::verification_token;

pub struct SeaOrmTokenStore {
    db: DatabaseConnection,
}

impl SeaOrmTokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn model_to_domain(model: verification_token::Model) -> VerificationToken {
    VerificationToken {
        id: model.id,
        whatsapp_number: model.whatsapp_number,
        token: model.token,
        created_at: model.created_at,
    }
}

#[async_trait]
impl TokenStore for SeaOrmTokenStore {
    async fn upsert(&self, token: &VerificationToken) -> DomainResult<()> {
        // Replace-by-number: a re-request invalidates the previous code.
        verification_token::Entity::delete_many()
            .filter(verification_token::Column::WhatsappNumber.eq(token.whatsapp_number.clone()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        let record = verification_token::ActiveModel {
            id: Set(token.id.clone()),
            whatsapp_number: Set(token.whatsapp_number.clone()),
            token: Set(token.token.clone()),
            created_at: Set(token.created_at),
        };

        record.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_number(
        &self,
        whatsapp_number: &str,
    ) -> DomainResult<Option<VerificationToken>> {
        let model = verification_token::Entity::find()
            .filter(verification_token::Column::WhatsappNumber.eq(whatsapp_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn delete_by_number(&self, whatsapp_number: &str) -> DomainResult<()> {
        verification_token::Entity::delete_many()
            .filter(verification_token::Column::WhatsappNumber.eq(whatsapp_number))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> SeaOrmTokenStore {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmTokenStore::new(db)
    }

    #[tokio::test]
    async fn upsert_replaces_previous_token_for_number() {
        let store = setup().await;

        let first = VerificationToken::issue("233200000001".into(), "111111".into());
        store.upsert(&first).await.unwrap();

        let second = VerificationToken::issue("233200000001".into(), "222222".into());
        store.upsert(&second).await.unwrap();

        let found = store.find_by_number("233200000001").await.unwrap().unwrap();
        assert_eq!(found.token, "222222");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = setup().await;
        store.delete_by_number("233200000002").await.unwrap();
        assert!(store.find_by_number("233200000002").await.unwrap().is_none());
    }
}
