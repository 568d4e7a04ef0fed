use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, AUTHORIZATION,
};
use axum::http::{HeaderMap, HeaderName, Method, Request, StatusCode};
use casting_application::{
    ActorRepository, ActorService, AuthorizationService, MovieRepository, MovieService,
};
use casting_core::{AppError, AppResult};
use casting_domain::{
    Actor, ActorId, ActorUpdate, Movie, MovieId, MovieUpdate, NewActor, NewMovie, Role,
};
use casting_infrastructure::{InMemoryCastingRepository, JwtTokenCodec, TokenGrant};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api_config::{ApiConfig, PersistenceErrorPolicy};
use crate::api_router::build_router;
use crate::state::AppState;

const SECRET: &str = "casting-agency-router-test-secret-000";
const ISSUER: &str = "https://casting.example/";
const AUDIENCE: &str = "casting";

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

struct UnavailableRepository;

#[async_trait]
impl MovieRepository for UnavailableRepository {
    async fn insert_movie(&self, _movie: NewMovie) -> AppResult<Movie> {
        Err(unavailable())
    }

    async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        Err(unavailable())
    }

    async fn find_movie(&self, _id: MovieId) -> AppResult<Option<Movie>> {
        Err(unavailable())
    }

    async fn update_movie(&self, _id: MovieId, _update: &MovieUpdate) -> AppResult<Option<Movie>> {
        Err(unavailable())
    }

    async fn delete_movie(&self, _id: MovieId) -> AppResult<bool> {
        Err(unavailable())
    }
}

#[async_trait]
impl ActorRepository for UnavailableRepository {
    async fn insert_actor(&self, _actor: NewActor) -> AppResult<Actor> {
        Err(unavailable())
    }

    async fn list_actors(&self) -> AppResult<Vec<Actor>> {
        Err(unavailable())
    }

    async fn find_actor(&self, _id: ActorId) -> AppResult<Option<Actor>> {
        Err(unavailable())
    }

    async fn update_actor(&self, _id: ActorId, _update: &ActorUpdate) -> AppResult<Option<Actor>> {
        Err(unavailable())
    }

    async fn delete_actor(&self, _id: ActorId) -> AppResult<bool> {
        Err(unavailable())
    }
}

fn unavailable() -> AppError {
    AppError::Internal("connection refused".to_owned())
}

fn codec() -> JwtTokenCodec {
    JwtTokenCodec::hs256(SECRET, ISSUER, AUDIENCE)
}

fn token_for(role: Role) -> String {
    issue(&TokenGrant::for_role("auth0|tester", role, Duration::hours(1)))
}

fn issue(grant: &TokenGrant) -> String {
    codec().issue(grant).unwrap_or_else(|_| unreachable!())
}

fn app_with(
    movie_repository: Arc<dyn MovieRepository>,
    actor_repository: Arc<dyn ActorRepository>,
    policy: PersistenceErrorPolicy,
) -> Router {
    let state = AppState {
        authorization_service: AuthorizationService::new(Arc::new(codec())),
        movie_service: MovieService::new(movie_repository),
        actor_service: ActorService::new(actor_repository),
    };

    build_router(state, None, policy).unwrap_or_else(|_| unreachable!())
}

fn app() -> Router {
    let repository = Arc::new(InMemoryCastingRepository::new());
    app_with(repository.clone(), repository, default_policy())
}

fn unavailable_app(policy: PersistenceErrorPolicy) -> Router {
    let repository = Arc::new(UnavailableRepository);
    app_with(repository.clone(), repository, policy)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = request
        .body(Body::from(body.to_owned()))
        .unwrap_or_else(|_| unreachable!());

    let response = app
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!());
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| unreachable!());
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| unreachable!())
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

async fn send_with_header(app: &Router, uri: &str, header_value: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, header_value)
        .body(Body::empty())
        .unwrap_or_else(|_| unreachable!());

    let response = app
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!());
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_else(|_| unreachable!());

    TestResponse {
        status,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or_else(|_| unreachable!()),
    }
}

fn header_text(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[tokio::test]
async fn index_and_health_are_public() {
    let app = app();

    let index = send(&app, Method::GET, "/", None, "").await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.body, json!({"success": true, "status": "App is running!"}));

    let health = send(&app, Method::GET, "/health", None, "").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_an_authorization_header() {
    let app = app();

    for (method, uri) in [
        (Method::GET, "/movies"),
        (Method::GET, "/actors"),
        (Method::POST, "/movies"),
        (Method::POST, "/actors"),
        (Method::PATCH, "/movies/1"),
        (Method::PATCH, "/actors/1"),
        (Method::DELETE, "/movies/1"),
        (Method::DELETE, "/actors/1"),
    ] {
        let response = send(&app, method, uri, None, "").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.body["success"], false);
        assert_eq!(response.body["code"], "authorization_header_missing");
    }
}

#[tokio::test]
async fn malformed_headers_are_rejected() {
    let app = app();
    let token = token_for(Role::ExecutiveProducer);

    for header_value in [
        "Token abc".to_owned(),
        "bearer abc".to_owned(),
        "Bearer ".to_owned(),
        format!("Bearer {token} extra"),
    ] {
        let response = send_with_header(&app, "/movies", &header_value).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{header_value}");
        assert_eq!(response.body["code"], "invalid_header");
    }
}

#[tokio::test]
async fn token_without_required_permission_is_forbidden() {
    let app = app();
    let assistant = token_for(Role::CastingAssistant);

    let response = send(
        &app,
        Method::POST,
        "/movies",
        Some(&assistant),
        r#"{"name":"The Matrix"}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["code"], "unauthorized");

    let director = token_for(Role::CastingDirector);
    let response = send(&app, Method::DELETE, "/movies/1", Some(&director), "").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn token_without_permissions_claim_is_a_bad_request() {
    let app = app();
    let token = issue(&TokenGrant {
        subject: "auth0|no-permissions".to_owned(),
        permissions: None,
        issued_at: Utc::now(),
        lifetime: Duration::hours(1),
    });

    let response = send(&app, Method::GET, "/movies", Some(&token), "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "invalid_claims");
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_unauthorized() {
    let app = app();
    let expired = issue(&TokenGrant {
        issued_at: Utc::now() - Duration::hours(3),
        ..TokenGrant::for_role("auth0|late", Role::ExecutiveProducer, Duration::hours(1))
    });

    let response = send(&app, Method::GET, "/actors", Some(&expired), "").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "token_expired");

    let just_expired = issue(&TokenGrant {
        issued_at: Utc::now() - Duration::seconds(35),
        ..TokenGrant::for_role("auth0|late", Role::ExecutiveProducer, Duration::seconds(5))
    });

    let response = send(&app, Method::GET, "/movies", Some(&just_expired), "").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "token_expired");

    let foreign = JwtTokenCodec::hs256("a-completely-different-signing-secret", ISSUER, AUDIENCE)
        .issue(&TokenGrant::for_role(
            "auth0|intruder",
            Role::ExecutiveProducer,
            Duration::hours(1),
        ))
        .unwrap_or_else(|_| unreachable!());

    let response = send(&app, Method::GET, "/actors", Some(&foreign), "").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["code"], "invalid_claims");
}

#[tokio::test]
async fn authorization_runs_before_body_validation() {
    let app = app();
    let assistant = token_for(Role::CastingAssistant);

    let missing = send(&app, Method::POST, "/actors", None, "not json").await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let forbidden = send(
        &app,
        Method::PATCH,
        "/movies/1",
        Some(&assistant),
        r#"{"rdate":null}"#,
    )
    .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_store_lists_are_empty() {
    let app = app();
    let assistant = token_for(Role::CastingAssistant);

    let movies = send(&app, Method::GET, "/movies", Some(&assistant), "").await;
    assert_eq!(movies.status, StatusCode::OK);
    assert_eq!(movies.body, json!({"movies": [], "success": true}));

    let actors = send(&app, Method::GET, "/actors", Some(&assistant), "").await;
    assert_eq!(actors.status, StatusCode::OK);
    assert_eq!(actors.body, json!({"Actors": [], "success": true}));
}

#[tokio::test]
async fn created_movie_appears_in_listing() {
    let app = app();
    let producer = token_for(Role::ExecutiveProducer);

    let created = send(
        &app,
        Method::POST,
        "/movies",
        Some(&producer),
        r#"{"name":"The Matrix","rdate":"March 30, 1999"}"#,
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["success"], true);
    assert_eq!(created.body["status"], "Successfully added a movie");
    assert_eq!(created.body["movie"]["name"], "The Matrix");
    assert_eq!(created.body["movie"]["rdate"], "March 30, 1999");

    let assistant = token_for(Role::CastingAssistant);
    let listed = send(&app, Method::GET, "/movies", Some(&assistant), "").await;

    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(
        listed.body["movies"],
        json!([{
            "id": created.body["movie"]["id"],
            "name": "The Matrix",
            "rdate": "March 30, 1999",
        }])
    );
}

#[tokio::test]
async fn create_rejects_invalid_bodies() {
    let app = app();
    let producer = token_for(Role::ExecutiveProducer);

    for (uri, body) in [
        ("/movies", ""),
        ("/movies", "[]"),
        ("/movies", r#"{"rdate":"1999"}"#),
        ("/movies", r#"{"name":42}"#),
        ("/movies", r#"{"name":"   "}"#),
        ("/actors", r#"{"name":"Keanu Reeves","age":"old"}"#),
        ("/actors", r#"{"name":"Keanu Reeves","age":-1}"#),
        ("/actors", r#"{"age":58}"#),
    ] {
        let response = send(&app, Method::POST, uri, Some(&producer), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert_eq!(response.body["success"], false);
    }
}

#[tokio::test]
async fn patch_movie_with_null_rdate_is_a_bad_request() {
    let app = app();
    let producer = token_for(Role::ExecutiveProducer);

    let created = send(
        &app,
        Method::POST,
        "/movies",
        Some(&producer),
        r#"{"name":"Speed","rdate":"1994"}"#,
    )
    .await;
    let id = created.body["movie"]["id"].clone();

    for uri in [format!("/movies/{id}"), "/movies/999".to_owned()] {
        for body in [r#"{"rdate":null}"#, "{}"] {
            let response = send(&app, Method::PATCH, &uri, Some(&producer), body).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri} {body}");
        }
    }

    let updated = send(
        &app,
        Method::PATCH,
        &format!("/movies/{id}"),
        Some(&producer),
        r#"{"rdate":"June 10, 1994"}"#,
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["movie"]["name"], "Speed");
    assert_eq!(updated.body["movie"]["rdate"], "June 10, 1994");
}

#[tokio::test]
async fn patch_actor_changes_only_supplied_fields() {
    let app = app();
    let director = token_for(Role::CastingDirector);

    let created = send(
        &app,
        Method::POST,
        "/actors",
        Some(&director),
        r#"{"name":"Carrie-Anne Moss","age":55,"gender":"female"}"#,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["actor"]["id"].clone();

    let updated = send(
        &app,
        Method::PATCH,
        &format!("/actors/{id}"),
        Some(&director),
        r#"{"age":56}"#,
    )
    .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(
        updated.body["actor"],
        json!({"id": id, "name": "Carrie-Anne Moss", "age": 56, "gender": "female"})
    );

    let missing_fields = send(
        &app,
        Method::PATCH,
        &format!("/actors/{id}"),
        Some(&director),
        "{}",
    )
    .await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);

    let absent = send(
        &app,
        Method::PATCH,
        "/actors/999",
        Some(&director),
        r#"{"gender":"male"}"#,
    )
    .await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_actor_patches_keep_both_changes() {
    let app = app();
    let director = token_for(Role::CastingDirector);

    let created = send(
        &app,
        Method::POST,
        "/actors",
        Some(&director),
        r#"{"name":"Hugo Weaving","age":38,"gender":"male"}"#,
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let uri = format!("/actors/{}", created.body["actor"]["id"]);

    let (age, gender) = tokio::join!(
        send(&app, Method::PATCH, &uri, Some(&director), r#"{"age":39}"#),
        send(&app, Method::PATCH, &uri, Some(&director), r#"{"gender":"man"}"#),
    );
    assert_eq!(age.status, StatusCode::OK);
    assert_eq!(gender.status, StatusCode::OK);

    let listed = send(&app, Method::GET, "/actors", Some(&director), "").await;
    assert_eq!(listed.body["Actors"][0]["age"], 39);
    assert_eq!(listed.body["Actors"][0]["gender"], "man");
}

#[tokio::test]
async fn delete_reports_missing_and_removed_entities() {
    let app = app();
    let producer = token_for(Role::ExecutiveProducer);

    let missing = send(&app, Method::DELETE, "/movies/42", Some(&producer), "").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["success"], false);

    let not_an_id = send(&app, Method::DELETE, "/actors/abc", Some(&producer), "").await;
    assert_eq!(not_an_id.status, StatusCode::NOT_FOUND);

    let created = send(
        &app,
        Method::POST,
        "/actors",
        Some(&producer),
        r#"{"name":"Laurence Fishburne"}"#,
    )
    .await;
    let id = created.body["actor"]["id"].clone();

    let deleted = send(&app, Method::DELETE, &format!("/actors/{id}"), Some(&producer), "").await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(
        deleted.body,
        json!({"status": "Deleted Successful", "success": true, "deleted": id})
    );

    let again = send(&app, Method::DELETE, &format!("/actors/{id}"), Some(&producer), "").await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_paths_and_methods_use_the_error_envelope() {
    let app = app();

    let unknown = send(&app, Method::GET, "/directors", None, "").await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.body["success"], false);

    let wrong_method = send(&app, Method::PUT, "/movies", None, "").await;
    assert_eq!(wrong_method.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        wrong_method.body,
        json!({"message": "method NOT allowed!", "success": false})
    );
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = app();

    for response in [
        send(&app, Method::GET, "/", None, "").await,
        send(&app, Method::GET, "/movies", None, "").await,
        send(&app, Method::GET, "/missing", None, "").await,
    ] {
        assert_eq!(
            header_text(&response.headers, ACCESS_CONTROL_ALLOW_HEADERS),
            Some("Content-Type, Authorization")
        );
        assert_eq!(
            header_text(&response.headers, ACCESS_CONTROL_ALLOW_METHODS),
            Some("GET, POST, PATCH, DELETE")
        );
    }
}

fn default_policy() -> PersistenceErrorPolicy {
    let variables = [
        ("STORAGE_BACKEND", "memory"),
        ("AUTH_ISSUER", ISSUER),
        ("AUTH_AUDIENCE", AUDIENCE),
        ("AUTH_SIGNING_SECRET", SECRET),
    ];

    ApiConfig::from_sources(&[], |name| {
        variables
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    })
    .map(|config| config.persistence_error_policy)
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn backend_failures_are_reported_as_not_found_by_default() {
    let app = unavailable_app(default_policy());
    let producer = token_for(Role::ExecutiveProducer);

    let created = send(
        &app,
        Method::POST,
        "/movies",
        Some(&producer),
        r#"{"name":"The Matrix","rdate":"March 30, 1999"}"#,
    )
    .await;
    assert_eq!(created.status, StatusCode::NOT_FOUND);
    assert_eq!(created.body["success"], false);

    let listed = send(&app, Method::GET, "/actors", Some(&producer), "").await;
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
    assert_eq!(listed.body["success"], false);

    let deleted = send(&app, Method::DELETE, "/movies/1", Some(&producer), "").await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);

    let unauthorized = send(&app, Method::GET, "/actors", None, "").await;
    assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn surface_policy_reports_backend_failures_as_internal_errors() {
    let app = unavailable_app(PersistenceErrorPolicy::Surface);
    let producer = token_for(Role::ExecutiveProducer);

    let response = send(&app, Method::GET, "/movies", Some(&producer), "").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({"message": "internal server error", "success": false})
    );

    let deleted = send(&app, Method::DELETE, "/movies/1", Some(&producer), "").await;
    assert_eq!(deleted.status, StatusCode::INTERNAL_SERVER_ERROR);
}
