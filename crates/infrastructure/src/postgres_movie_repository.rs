use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use casting_application::MovieRepository;
use casting_core::{AppError, AppResult};
use casting_domain::{Movie, MovieId, MovieUpdate, NewMovie};

/// PostgreSQL-backed movie repository.
#[derive(Clone)]
pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MovieRow {
    id: i64,
    name: String,
    release_date: Option<String>,
}

impl TryFrom<MovieRow> for Movie {
    type Error = AppError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Movie::new(MovieId::new(row.id), row.name, row.release_date).map_err(|error| {
            AppError::Internal(format!("stored movie '{}' is invalid: {error}", row.id))
        })
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn insert_movie(&self, movie: NewMovie) -> AppResult<Movie> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO movies (name, release_date)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(movie.name().as_str())
        .bind(movie.release_date())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert movie: {error}")))?;

        Ok(movie.into_movie(MovieId::new(id)))
    }

    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, name, release_date
            FROM movies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list movies: {error}")))?;

        rows.into_iter().map(Movie::try_from).collect()
    }

    async fn find_movie(&self, id: MovieId) -> AppResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, name, release_date
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find movie '{id}': {error}")))?;

        row.map(Movie::try_from).transpose()
    }

    async fn update_movie(&self, id: MovieId, update: &MovieUpdate) -> AppResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            UPDATE movies
            SET release_date = $2
            WHERE id = $1
            RETURNING id, name, release_date
            "#,
        )
        .bind(id.as_i64())
        .bind(update.release_date())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update movie '{id}': {error}")))?;

        row.map(Movie::try_from).transpose()
    }

    async fn delete_movie(&self, id: MovieId) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete movie '{id}': {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
