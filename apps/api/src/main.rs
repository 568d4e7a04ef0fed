//! Casting agency API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use casting_application::{
    ActorRepository, ActorService, AuthorizationService, MovieRepository, MovieService,
    TokenDecoder,
};
use casting_core::AppError;
use casting_infrastructure::{
    InMemoryCastingRepository, JwtTokenCodec, MIGRATOR, PostgresActorRepository,
    PostgresMovieRepository, TokenGrant,
};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api_config::{
    ApiCommand, ApiConfig, AuthConfig, StorageConfig, TokenKeyConfig, init_tracing,
};
use crate::state::AppState;

const DEV_TOKEN_LIFETIME_HOURS: i64 = 24;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let token_codec = build_token_codec(&config.auth)?;

    if let ApiCommand::IssueToken { role, subject } = &config.command {
        let token = token_codec.issue(&TokenGrant::for_role(
            subject.as_str(),
            *role,
            Duration::hours(DEV_TOKEN_LIFETIME_HOURS),
        ))?;
        info!(role = role.as_str(), subject = %subject, "issued development token");
        println!("{token}");
        return Ok(());
    }

    let (movie_repository, actor_repository) = match &config.storage {
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .connect(database_url)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to connect to database: {error}"))
                })?;

            MIGRATOR
                .run(&pool)
                .await
                .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

            if config.command == ApiCommand::Migrate {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let movie_repository: Arc<dyn MovieRepository> =
                Arc::new(PostgresMovieRepository::new(pool.clone()));
            let actor_repository: Arc<dyn ActorRepository> =
                Arc::new(PostgresActorRepository::new(pool));
            (movie_repository, actor_repository)
        }
        StorageConfig::Memory => {
            warn!("using in-memory storage, records are lost on shutdown");
            let repository = Arc::new(InMemoryCastingRepository::new());
            let movie_repository: Arc<dyn MovieRepository> = repository.clone();
            let actor_repository: Arc<dyn ActorRepository> = repository;
            (movie_repository, actor_repository)
        }
    };

    let token_decoder: Arc<dyn TokenDecoder> = Arc::new(token_codec);
    let app_state = AppState {
        authorization_service: AuthorizationService::new(token_decoder),
        movie_service: MovieService::new(movie_repository),
        actor_service: ActorService::new(actor_repository),
    };

    let app = api_router::build_router(
        app_state,
        config.cors_allowed_origin.as_deref(),
        config.persistence_error_policy,
    )?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind api listener: {error}")))?;

    info!(%address, "casting-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn build_token_codec(auth: &AuthConfig) -> Result<JwtTokenCodec, AppError> {
    match &auth.key {
        TokenKeyConfig::Hs256 { signing_secret } => Ok(JwtTokenCodec::hs256(
            signing_secret,
            auth.issuer.as_str(),
            auth.audience.as_str(),
        )),
        TokenKeyConfig::Rs256 { public_key_pem } => JwtTokenCodec::rs256_from_pem(
            public_key_pem,
            auth.issuer.as_str(),
            auth.audience.as_str(),
        ),
    }
}
