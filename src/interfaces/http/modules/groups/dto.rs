//! Group and template DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Group, GroupPatch, NewGroup, Template};

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ref: Option<String>,
    pub group_name: String,
    pub description: String,
    pub paid: bool,
    pub group_link: String,
    pub templates: Vec<TemplateDto>,
}

impl From<Group> for GroupDto {
    fn from(g: Group) -> Self {
        Self {
            id: g.id,
            group_ref: g.group_ref,
            group_name: g.group_name,
            description: g.description,
            paid: g.paid,
            group_link: g.group_link,
            templates: g.templates.into_iter().map(TemplateDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TemplateDto {
    pub id: String,
    pub content: String,
}

impl From<Template> for TemplateDto {
    fn from(t: Template) -> Self {
        Self {
            id: t.id,
            content: t.content,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGroupRequest {
    pub group_ref: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub group_name: String,
    pub description: String,
    #[serde(default)]
    pub paid: bool,
    #[validate(url)]
    pub group_link: String,
}

impl From<CreateGroupRequest> for NewGroup {
    fn from(r: CreateGroupRequest) -> Self {
        Self {
            group_ref: r.group_ref,
            group_name: r.group_name,
            description: r.description,
            paid: r.paid,
            group_link: r.group_link,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub group_name: Option<String>,
    pub description: Option<String>,
    pub paid: Option<bool>,
    #[validate(url)]
    pub group_link: Option<String>,
}

impl From<UpdateGroupRequest> for GroupPatch {
    fn from(r: UpdateGroupRequest) -> Self {
        Self {
            group_name: r.group_name,
            description: r.description,
            paid: r.paid,
            group_link: r.group_link,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TemplateRequest {
    #[validate(length(min = 1, max = 4096))]
    pub content: String,
}
