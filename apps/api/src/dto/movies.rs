use casting_domain::Movie;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for movie creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-movie-request.ts"
)]
pub struct CreateMovieRequest {
    pub name: String,
    #[serde(default, alias = "release_date")]
    #[ts(optional)]
    pub rdate: Option<String>,
}

/// Incoming payload for movie updates; `rdate` must be present and non-null.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-movie-request.ts"
)]
pub struct UpdateMovieRequest {
    #[serde(default, alias = "release_date")]
    pub rdate: Option<String>,
}

/// API representation of a movie.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/movie-response.ts"
)]
pub struct MovieResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub rdate: Option<String>,
}

impl From<Movie> for MovieResponse {
    fn from(value: Movie) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            rdate: value.release_date().map(ToOwned::to_owned),
        }
    }
}

/// Listing of every stored movie.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/movie-list-response.ts"
)]
pub struct MovieListResponse {
    pub movies: Vec<MovieResponse>,
    pub success: bool,
}

impl MovieListResponse {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: movies.into_iter().map(MovieResponse::from).collect(),
            success: true,
        }
    }
}

/// Result of creating or updating a movie.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/movie-mutation-response.ts"
)]
pub struct MovieMutationResponse {
    pub status: &'static str,
    pub success: bool,
    pub movie: MovieResponse,
}

impl MovieMutationResponse {
    pub fn created(movie: Movie) -> Self {
        Self {
            status: "Successfully added a movie",
            success: true,
            movie: movie.into(),
        }
    }

    pub fn updated(movie: Movie) -> Self {
        Self {
            status: "Movie updated",
            success: true,
            movie: movie.into(),
        }
    }
}
