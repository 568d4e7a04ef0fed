//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod actor;
mod movie;
mod security;

pub use actor::{Actor, ActorId, ActorUpdate, NewActor};
pub use movie::{Movie, MovieId, MovieUpdate, NewMovie};
pub use security::{Permission, PermissionSet, Role};
