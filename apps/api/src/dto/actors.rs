use casting_domain::Actor;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for actor creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-actor-request.ts"
)]
pub struct CreateActorRequest {
    pub name: String,
    #[serde(default)]
    #[ts(optional)]
    pub age: Option<i32>,
    #[serde(default)]
    #[ts(optional)]
    pub gender: Option<String>,
}

/// Incoming payload for actor updates; at least one field must be supplied.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-actor-request.ts"
)]
pub struct UpdateActorRequest {
    #[serde(default)]
    #[ts(optional)]
    pub age: Option<i32>,
    #[serde(default)]
    #[ts(optional)]
    pub gender: Option<String>,
}

/// API representation of an actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/actor-response.ts"
)]
pub struct ActorResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
}

impl From<Actor> for ActorResponse {
    fn from(value: Actor) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            age: value.age(),
            gender: value.gender().map(ToOwned::to_owned),
        }
    }
}

/// Listing of every stored actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/actor-list-response.ts"
)]
pub struct ActorListResponse {
    /// Capitalised for compatibility with existing clients.
    #[serde(rename = "Actors")]
    pub actors: Vec<ActorResponse>,
    pub success: bool,
}

impl ActorListResponse {
    pub fn new(actors: Vec<Actor>) -> Self {
        Self {
            actors: actors.into_iter().map(ActorResponse::from).collect(),
            success: true,
        }
    }
}

/// Result of creating or updating an actor.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/actor-mutation-response.ts"
)]
pub struct ActorMutationResponse {
    pub status: &'static str,
    pub success: bool,
    pub actor: ActorResponse,
}

impl ActorMutationResponse {
    pub fn created(actor: Actor) -> Self {
        Self {
            status: "Successfully added an actor",
            success: true,
            actor: actor.into(),
        }
    }

    pub fn updated(actor: Actor) -> Self {
        Self {
            status: "Actor updated successfully",
            success: true,
            actor: actor.into(),
        }
    }
}
