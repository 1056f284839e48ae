//! User DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::User;
use crate::interfaces::http::modules::communities::CommunityDto;
use crate::interfaces::http::modules::groups::GroupDto;

/// Full account view with the embedded collections. The password hash is
/// never serialized.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub whatsapp_number: String,
    pub email: String,
    pub groups: Vec<GroupDto>,
    pub communities: Vec<CommunityDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            whatsapp_number: u.whatsapp_number,
            email: u.email,
            groups: u.groups.into_iter().map(GroupDto::from).collect(),
            communities: u.communities.into_iter().map(CommunityDto::from).collect(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}
