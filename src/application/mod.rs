//! Application layer

pub mod services;

pub use services::{
    AccountService, AuthResult, CommunityService, GroupService, VerificationService,
};
