//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_casting_repository;
mod jwt_token_codec;
mod postgres_actor_repository;
mod postgres_movie_repository;

pub use in_memory_casting_repository::InMemoryCastingRepository;
pub use jwt_token_codec::{JwtTokenCodec, TokenGrant};
pub use postgres_actor_repository::PostgresActorRepository;
pub use postgres_movie_repository::PostgresMovieRepository;

/// Embedded schema migrations for the PostgreSQL repositories.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
