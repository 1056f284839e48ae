//! Group and template endpoints, scoped under the owning user.

pub mod dto;
pub mod handlers;

pub use dto::{CreateGroupRequest, GroupDto, TemplateDto, TemplateRequest, UpdateGroupRequest};
pub use handlers::{
    create_group, create_template, delete_group, delete_template, get_group, get_template,
    list_groups, list_templates, update_group, update_template, GroupHandlerState,
};
