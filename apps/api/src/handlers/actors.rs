use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use casting_domain::{ActorId, ActorUpdate, NewActor, Permission};

use crate::dto::{
    CreateActorRequest, DeletionResponse, ActorListResponse, ActorMutationResponse,
    UpdateActorRequest,
};
use crate::error::ApiResult;
use crate::handlers::request::{authorize, parse_json_body, parse_path_id};
use crate::state::AppState;

pub async fn list_actors_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ActorListResponse>> {
    authorize(&state, &headers, Permission::GetActors)?;

    let actors = state.actor_service.list_actors().await?;

    Ok(Json(ActorListResponse::new(actors)))
}

pub async fn create_actor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ActorMutationResponse>)> {
    authorize(&state, &headers, Permission::PostActors)?;

    let payload: CreateActorRequest = parse_json_body(&body)?;
    let actor = state
        .actor_service
        .create_actor(NewActor::new(payload.name, payload.age, payload.gender)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActorMutationResponse::created(actor)),
    ))
}

pub async fn update_actor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(actor_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ActorMutationResponse>> {
    authorize(&state, &headers, Permission::ModifyActors)?;

    let payload: UpdateActorRequest = parse_json_body(&body)?;
    let update = ActorUpdate::new(payload.age, payload.gender)?;
    let actor_id = ActorId::new(parse_path_id(&actor_id, "actor")?);

    let actor = state.actor_service.update_actor(actor_id, update).await?;

    Ok(Json(ActorMutationResponse::updated(actor)))
}

pub async fn delete_actor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(actor_id): Path<String>,
) -> ApiResult<Json<DeletionResponse>> {
    authorize(&state, &headers, Permission::DeleteActors)?;

    let actor_id = ActorId::new(parse_path_id(&actor_id, "actor")?);
    state.actor_service.delete_actor(actor_id).await?;

    Ok(Json(DeletionResponse::new(actor_id.as_i64())))
}
