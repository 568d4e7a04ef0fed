use std::sync::Arc;

use casting_core::{AppError, AppResult};
use casting_domain::{Movie, MovieId, MovieUpdate, NewMovie};

use crate::MovieRepository;

/// Application service for movie use-cases.
///
/// Callers authorize before invoking any method; the service only enforces
/// entity invariants and existence.
#[derive(Clone)]
pub struct MovieService {
    repository: Arc<dyn MovieRepository>,
}

impl MovieService {
    /// Creates a new movie service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }

    /// Lists every movie.
    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.repository.list_movies().await
    }

    /// Stores a new movie.
    pub async fn create_movie(&self, movie: NewMovie) -> AppResult<Movie> {
        self.repository.insert_movie(movie).await
    }

    /// Applies a partial update to an existing movie.
    pub async fn update_movie(&self, id: MovieId, update: MovieUpdate) -> AppResult<Movie> {
        self.repository
            .update_movie(id, &update)
            .await?
            .ok_or_else(|| movie_not_found(id))
    }

    /// Deletes an existing movie.
    pub async fn delete_movie(&self, id: MovieId) -> AppResult<()> {
        if !self.repository.delete_movie(id).await? {
            return Err(movie_not_found(id));
        }

        Ok(())
    }
}

fn movie_not_found(id: MovieId) -> AppError {
    AppError::NotFound(format!("movie '{id}' does not exist"))
}
