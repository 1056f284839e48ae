//! SeaORM store implementations

pub mod user_repository;
pub mod verification_token_repository;

pub use user_repository::SeaOrmUserStore;
pub use verification_token_repository::SeaOrmTokenStore;
