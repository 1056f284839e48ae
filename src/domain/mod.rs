//! Core business entities, errors and store interfaces.

pub mod error;
pub mod token;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use token::{TokenStore, VerificationToken};
pub use user::{
    Answer, Community, CommunityPatch, Event, Group, GroupPatch, NewCommunity, NewEvent,
    NewGroup, RegisterUser, Template, User, UserStore,
};
