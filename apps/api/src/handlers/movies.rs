use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use casting_domain::{MovieId, MovieUpdate, NewMovie, Permission};

use crate::dto::{
    CreateMovieRequest, DeletionResponse, MovieListResponse, MovieMutationResponse,
    UpdateMovieRequest,
};
use crate::error::ApiResult;
use crate::handlers::request::{authorize, parse_json_body, parse_path_id};
use crate::state::AppState;

pub async fn list_movies_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<MovieListResponse>> {
    authorize(&state, &headers, Permission::GetMovies)?;

    let movies = state.movie_service.list_movies().await?;

    Ok(Json(MovieListResponse::new(movies)))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MovieMutationResponse>)> {
    authorize(&state, &headers, Permission::PostMovies)?;

    let payload: CreateMovieRequest = parse_json_body(&body)?;
    let movie = state
        .movie_service
        .create_movie(NewMovie::new(payload.name, payload.rdate)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MovieMutationResponse::created(movie)),
    ))
}

pub async fn update_movie_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(movie_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MovieMutationResponse>> {
    authorize(&state, &headers, Permission::ModifyMovies)?;

    let payload: UpdateMovieRequest = parse_json_body(&body)?;
    let update = MovieUpdate::new(payload.rdate)?;
    let movie_id = MovieId::new(parse_path_id(&movie_id, "movie")?);

    let movie = state.movie_service.update_movie(movie_id, update).await?;

    Ok(Json(MovieMutationResponse::updated(movie)))
}

pub async fn delete_movie_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(movie_id): Path<String>,
) -> ApiResult<Json<DeletionResponse>> {
    authorize(&state, &headers, Permission::DeleteMovies)?;

    let movie_id = MovieId::new(parse_path_id(&movie_id, "movie")?);
    state.movie_service.delete_movie(movie_id).await?;

    Ok(Json(DeletionResponse::new(movie_id.as_i64())))
}
