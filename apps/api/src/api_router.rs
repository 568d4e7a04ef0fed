mod cors;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS};
use axum::middleware::from_fn;
use axum::routing::{get, patch};
use casting_core::AppError;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api_config::PersistenceErrorPolicy;
use crate::state::AppState;
use crate::{handlers, middleware};

const ALLOWED_HEADERS: &str = "Content-Type, Authorization";
const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

pub fn build_router(
    app_state: AppState,
    cors_allowed_origin: Option<&str>,
    persistence_error_policy: PersistenceErrorPolicy,
) -> Result<Router, AppError> {
    let router = Router::new()
        .route("/", get(handlers::health::index_handler))
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/movies",
            get(handlers::movies::list_movies_handler).post(handlers::movies::create_movie_handler),
        )
        .route(
            "/movies/{movie_id}",
            patch(handlers::movies::update_movie_handler)
                .delete(handlers::movies::delete_movie_handler),
        )
        .route(
            "/actors",
            get(handlers::actors::list_actors_handler).post(handlers::actors::create_actor_handler),
        )
        .route(
            "/actors/{actor_id}",
            patch(handlers::actors::update_actor_handler)
                .delete(handlers::actors::delete_actor_handler),
        )
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed_handler)
        .fallback(handlers::fallback::not_found_handler)
        .with_state(app_state);

    let router = match persistence_error_policy {
        PersistenceErrorPolicy::Surface => router,
        PersistenceErrorPolicy::MaskAsNotFound => {
            router.layer(from_fn(middleware::mask_backend_errors))
        }
    };

    Ok(router
        .layer(cors::build_cors_layer(cors_allowed_origin)?)
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http()))
}
