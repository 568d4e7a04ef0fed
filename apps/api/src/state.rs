use casting_application::{ActorService, AuthorizationService, MovieService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub movie_service: MovieService,
    pub actor_service: ActorService,
}
