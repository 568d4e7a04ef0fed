use async_trait::async_trait;
use casting_core::AppResult;
use casting_domain::{Actor, ActorId, ActorUpdate, Movie, MovieId, MovieUpdate, NewActor, NewMovie};

/// Repository port for movie persistence.
///
/// Lookups distinguish a missing row (`Ok(None)` / `Ok(false)`) from a backend
/// failure (`Err(AppError::Internal)`). Updates are applied by the store in a
/// single step, so concurrent partial updates never overwrite each other.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Stores a new movie and returns it with its assigned identifier.
    async fn insert_movie(&self, movie: NewMovie) -> AppResult<Movie>;

    /// Lists every stored movie ordered by identifier.
    async fn list_movies(&self) -> AppResult<Vec<Movie>>;

    /// Finds one movie by identifier.
    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>>;

    /// Applies a partial update and returns the stored result.
    ///
    /// Returns `None` when no row with the identifier exists.
    async fn update_movie(&self, id: MovieId, update: &MovieUpdate) -> AppResult<Option<Movie>>;

    /// Deletes a movie. Returns `false` when no row with the identifier exists.
    async fn delete_movie(&self, id: MovieId) -> AppResult<bool>;
}

/// Repository port for actor persistence.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Stores a new actor and returns it with its assigned identifier.
    async fn insert_actor(&self, actor: NewActor) -> AppResult<Actor>;

    /// Lists every stored actor ordered by identifier.
    async fn list_actors(&self) -> AppResult<Vec<Actor>>;

    /// Finds one actor by identifier.
    async fn find_actor(&self, id: ActorId) -> AppResult<Option<Actor>>;

    /// Applies a partial update; omitted fields keep their stored values.
    ///
    /// Returns `None` when no row with the identifier exists.
    async fn update_actor(&self, id: ActorId, update: &ActorUpdate) -> AppResult<Option<Actor>>;

    /// Deletes an actor. Returns `false` when no row with the identifier exists.
    async fn delete_actor(&self, id: ActorId) -> AppResult<bool>;
}
