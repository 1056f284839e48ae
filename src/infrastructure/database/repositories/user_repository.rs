//! SeaORM-backed user aggregate store.
//!
//! The aggregate maps to a single row: scalar identity columns plus two
//! JSON columns holding the embedded groups and communities. `save`
//! rewrites the whole row guarded by the version column; a write that
//! matches zero rows lost the race (or the user is gone) and is reported
//! accordingly.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::domain::{DomainError, DomainResult, User, UserStore};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserStore {
    db: DatabaseConnection,
}

impl SeaOrmUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

fn json_err(e: serde_json::Error) -> DomainError {
    DomainError::Storage(format!("Corrupt aggregate payload: {}", e))
}

fn model_to_domain(model: user::Model) -> DomainResult<User> {
    Ok(User {
        id: model.id,
        name: model.name,
        whatsapp_number: model.whatsapp_number,
        email: model.email,
        password_hash: model.password_hash,
        groups: serde_json::from_value(model.groups).map_err(json_err)?,
        communities: serde_json::from_value(model.communities).map_err(json_err)?,
        version: model.version,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn insert(&self, u: &User) -> DomainResult<()> {
        let groups = serde_json::to_value(&u.groups).map_err(json_err)?;
        let communities = serde_json::to_value(&u.communities).map_err(json_err)?;

        let new_user = user::ActiveModel {
            id: Set(u.id.clone()),
            name: Set(u.name.clone()),
            whatsapp_number: Set(u.whatsapp_number.clone()),
            email: Set(u.email.clone()),
            password_hash: Set(u.password_hash.clone()),
            groups: Set(groups),
            communities: Set(communities),
            version: Set(u.version),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("User with email {} already exists", u.email))
            } else {
                db_err(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(model_to_domain).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(model_to_domain).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find().all(&self.db).await.map_err(db_err)?;

        models.into_iter().map(model_to_domain).collect()
    }

    async fn save(&self, u: &mut User) -> DomainResult<()> {
        let groups = serde_json::to_value(&u.groups).map_err(json_err)?;
        let communities = serde_json::to_value(&u.communities).map_err(json_err)?;
        let now = Utc::now();

        let result = user::Entity::update_many()
            .col_expr(user::Column::Name, Expr::value(u.name.clone()))
            .col_expr(
                user::Column::WhatsappNumber,
                Expr::value(u.whatsapp_number.clone()),
            )
            .col_expr(user::Column::Email, Expr::value(u.email.clone()))
            .col_expr(
                user::Column::PasswordHash,
                Expr::value(u.password_hash.clone()),
            )
            .col_expr(user::Column::Groups, Expr::value(groups))
            .col_expr(user::Column::Communities, Expr::value(communities))
            .col_expr(user::Column::Version, Expr::value(u.version + 1))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(u.id.clone()))
            .filter(user::Column::Version.eq(u.version))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            // Either the row is gone or someone else won the version race.
            let exists = user::Entity::find_by_id(&u.id)
                .one(&self.db)
                .await
                .map_err(db_err)?
                .is_some();

            return if exists {
                Err(DomainError::ConcurrentModification {
                    entity: "user",
                    id: u.id.clone(),
                })
            } else {
                Err(DomainError::not_found("user", &u.id))
            };
        }

        u.version += 1;
        u.updated_at = now;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("user", id));
        }

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
