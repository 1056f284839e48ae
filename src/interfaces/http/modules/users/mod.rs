//! Account endpoints.

pub mod dto;
pub mod handlers;

pub use dto::UserDto;
pub use handlers::{delete_user, get_user, list_users, UserHandlerState};
