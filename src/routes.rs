use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use http::{header, HeaderValue, Method};
use tower_cookies::CookieManagerLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    assets::COMPONENTS_URL_PREFIX,
    error::{AppError, Result},
    handlers, middleware_layer,
    state::AppState,
};

/// Request bodies are small form posts.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Login and registration attempts allowed in a burst, per peer IP.
const AUTH_BURST: u32 = 20;

/// Builds the CORS layer for the configured origins.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| AppError::Internal(format!("Invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400)))
}

/// Builds the application router.
///
/// Public auth routes are rate limited per peer IP, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the `Router`.
pub fn build_router(state: AppState) -> Result<Router> {
    let auth_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(1)
            .burst_size(AUTH_BURST)
            .finish()
            .ok_or_else(|| AppError::Internal("Invalid rate limit configuration".to_string()))?,
    );

    let page_routes = Router::new()
        .route("/", get(handlers::pages::home))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/api/login", post(handlers::auth::login))
        .route("/api/users", post(handlers::users::create_user))
        .layer(tower_governor::GovernorLayer::new(auth_governor_conf))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/api/sentences",
            post(handlers::sentences::create_sentence).get(handlers::sentences::list_sentences),
        )
        .route(
            "/api/sentences/{id}",
            delete(handlers::sentences::delete_sentence),
        )
        .route("/api/users/logout", post(handlers::auth::logout))
        .route("/api/users/me", get(handlers::users::me))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(page_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(
            COMPONENTS_URL_PREFIX,
            ServeDir::new(&state.config.components_dir),
        )
        .fallback_service(ServeDir::new(&state.config.public_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false))
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::INFO))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer(&state.config.cors_origins)?);

    Ok(app)
}
