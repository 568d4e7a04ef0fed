mod actors;
mod common;
mod movies;

pub use actors::{
    ActorListResponse, ActorMutationResponse, ActorResponse, CreateActorRequest,
    UpdateActorRequest,
};
pub use common::{DeletionResponse, HealthResponse, IndexResponse};
pub use movies::{
    CreateMovieRequest, MovieListResponse, MovieMutationResponse, MovieResponse,
    UpdateMovieRequest,
};
