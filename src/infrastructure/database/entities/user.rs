//! User entity for database
//!
//! One row per registered user. The embedded collections (groups with
//! their templates, communities with questions/answers/events) live in
//! the `groups` and `communities` JSON columns, so the row is the whole
//! aggregate. `version` guards every whole-aggregate write.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub whatsapp_number: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub groups: Json,
    pub communities: Json,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
