//! Verification token resource.

pub mod model;
pub mod repository;

pub use model::VerificationToken;
pub use repository::TokenStore;
