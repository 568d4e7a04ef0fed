use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use casting_application::ActorRepository;
use casting_core::{AppError, AppResult};
use casting_domain::{Actor, ActorId, ActorUpdate, NewActor};

/// PostgreSQL-backed actor repository.
#[derive(Clone)]
pub struct PostgresActorRepository {
    pool: PgPool,
}

impl PostgresActorRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActorRow {
    id: i64,
    name: String,
    age: Option<i32>,
    gender: Option<String>,
}

impl TryFrom<ActorRow> for Actor {
    type Error = AppError;

    fn try_from(row: ActorRow) -> Result<Self, Self::Error> {
        Actor::new(ActorId::new(row.id), row.name, row.age, row.gender).map_err(|error| {
            AppError::Internal(format!("stored actor '{}' is invalid: {error}", row.id))
        })
    }
}

#[async_trait]
impl ActorRepository for PostgresActorRepository {
    async fn insert_actor(&self, actor: NewActor) -> AppResult<Actor> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO actors (name, age, gender)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(actor.name().as_str())
        .bind(actor.age())
        .bind(actor.gender())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert actor: {error}")))?;

        Ok(actor.into_actor(ActorId::new(id)))
    }

    async fn list_actors(&self) -> AppResult<Vec<Actor>> {
        let rows = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list actors: {error}")))?;

        rows.into_iter().map(Actor::try_from).collect()
    }

    async fn find_actor(&self, id: ActorId) -> AppResult<Option<Actor>> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            SELECT id, name, age, gender
            FROM actors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find actor '{id}': {error}")))?;

        row.map(Actor::try_from).transpose()
    }

    async fn update_actor(&self, id: ActorId, update: &ActorUpdate) -> AppResult<Option<Actor>> {
        let row = sqlx::query_as::<_, ActorRow>(
            r#"
            UPDATE actors
            SET age = COALESCE($2, age), gender = COALESCE($3, gender)
            WHERE id = $1
            RETURNING id, name, age, gender
            "#,
        )
        .bind(id.as_i64())
        .bind(update.age())
        .bind(update.gender())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update actor '{id}': {error}")))?;

        row.map(Actor::try_from).transpose()
    }

    async fn delete_actor(&self, id: ActorId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM actors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete actor '{id}': {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
