//! User aggregate
//!
//! Contains the aggregate model, mutation inputs, and the store interface.

pub mod model;
pub mod mutations;
pub mod repository;

pub use model::{Answer, Community, Event, Group, Template, User};
pub use mutations::{
    CommunityPatch, GroupPatch, NewCommunity, NewEvent, NewGroup, RegisterUser,
};
pub use repository::UserStore;
