use std::sync::Arc;

use casting_core::{AppError, AppResult};
use casting_domain::{Actor, ActorId, ActorUpdate, NewActor};

use crate::ActorRepository;

/// Application service for actor use-cases.
#[derive(Clone)]
pub struct ActorService {
    repository: Arc<dyn ActorRepository>,
}

impl ActorService {
    /// Creates a new actor service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn ActorRepository>) -> Self {
        Self { repository }
    }

    /// Lists every actor.
    pub async fn list_actors(&self) -> AppResult<Vec<Actor>> {
        self.repository.list_actors().await
    }

    /// Stores a new actor.
    pub async fn create_actor(&self, actor: NewActor) -> AppResult<Actor> {
        self.repository.insert_actor(actor).await
    }

    /// Applies a partial update; omitted fields keep their values.
    pub async fn update_actor(&self, id: ActorId, update: ActorUpdate) -> AppResult<Actor> {
        self.repository
            .update_actor(id, &update)
            .await?
            .ok_or_else(|| actor_not_found(id))
    }

    /// Deletes an existing actor.
    pub async fn delete_actor(&self, id: ActorId) -> AppResult<()> {
        if !self.repository.delete_actor(id).await? {
            return Err(actor_not_found(id));
        }

        Ok(())
    }
}

fn actor_not_found(id: ActorId) -> AppError {
    AppError::NotFound(format!("actor '{id}' does not exist"))
}
