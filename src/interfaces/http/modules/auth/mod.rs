//! Registration and login endpoints.

pub mod dto;
pub mod handlers;

pub use dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use handlers::{login, register, AuthHandlerState};
