//! HTTP endpoint modules, one directory per resource.

pub mod auth;
pub mod communities;
pub mod groups;
pub mod health;
pub mod tokens;
pub mod users;
