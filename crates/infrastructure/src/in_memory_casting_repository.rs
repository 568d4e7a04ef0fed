use std::collections::BTreeMap;

use async_trait::async_trait;
use casting_application::{ActorRepository, MovieRepository};
use casting_core::AppResult;
use casting_domain::{Actor, ActorId, ActorUpdate, Movie, MovieId, MovieUpdate, NewActor, NewMovie};
use tokio::sync::RwLock;

/// Rows of one entity kind plus the last identifier handed out.
///
/// Identifiers are never reused, matching a database sequence.
#[derive(Debug)]
struct Table<K, V> {
    rows: BTreeMap<K, V>,
    last_id: i64,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<K, V> Table<K, V> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory movie and actor repository.
///
/// Used for local development without PostgreSQL and as the storage behind
/// router tests.
#[derive(Debug, Default)]
pub struct InMemoryCastingRepository {
    movies: RwLock<Table<MovieId, Movie>>,
    actors: RwLock<Table<ActorId, Actor>>,
}

impl InMemoryCastingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieRepository for InMemoryCastingRepository {
    async fn insert_movie(&self, movie: NewMovie) -> AppResult<Movie> {
        let mut movies = self.movies.write().await;
        let movie = movie.into_movie(MovieId::new(movies.next_id()));
        movies.rows.insert(movie.id(), movie.clone());
        Ok(movie)
    }

    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.read().await.rows.values().cloned().collect())
    }

    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>> {
        Ok(self.movies.read().await.rows.get(&id).cloned())
    }

    async fn update_movie(&self, id: MovieId, update: &MovieUpdate) -> AppResult<Option<Movie>> {
        let mut movies = self.movies.write().await;
        Ok(movies.rows.get_mut(&id).map(|movie| {
            movie.apply(update);
            movie.clone()
        }))
    }

    async fn delete_movie(&self, id: MovieId) -> AppResult<bool> {
        Ok(self.movies.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl ActorRepository for InMemoryCastingRepository {
    async fn insert_actor(&self, actor: NewActor) -> AppResult<Actor> {
        let mut actors = self.actors.write().await;
        let actor = actor.into_actor(ActorId::new(actors.next_id()));
        actors.rows.insert(actor.id(), actor.clone());
        Ok(actor)
    }

    async fn list_actors(&self) -> AppResult<Vec<Actor>> {
        Ok(self.actors.read().await.rows.values().cloned().collect())
    }

    async fn find_actor(&self, id: ActorId) -> AppResult<Option<Actor>> {
        Ok(self.actors.read().await.rows.get(&id).cloned())
    }

    async fn update_actor(&self, id: ActorId, update: &ActorUpdate) -> AppResult<Option<Actor>> {
        let mut actors = self.actors.write().await;
        Ok(actors.rows.get_mut(&id).map(|actor| {
            actor.apply(update);
            actor.clone()
        }))
    }

    async fn delete_actor(&self, id: ActorId) -> AppResult<bool> {
        Ok(self.actors.write().await.rows.remove(&id).is_some())
    }
}
