//! One-time verification code endpoints.

pub mod dto;
pub mod handlers;

pub use dto::{RequestTokenRequest, TokenIssuedResponse, VerifyTokenRequest};
pub use handlers::{request_token, verify_token, TokenHandlerState};
