//! Application services and ports.

#![forbid(unsafe_code)]

mod actor_service;
mod authorization_service;
mod casting_ports;
mod movie_service;

pub use actor_service::ActorService;
pub use authorization_service::{
    AccessClaims, AuthorizationService, TokenClaims, TokenDecoder, bearer_token,
};
pub use casting_ports::{ActorRepository, MovieRepository};
pub use movie_service::MovieService;
