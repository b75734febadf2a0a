use axum::extract::OriginalUri;
use axum::http::Method;
use axum::middleware;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod secure;
pub mod services;
pub mod versions;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Unknown routes and unsupported methods share one envelope:
/// `Cannot <METHOD> <path>`.
async fn fallback(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(format!("Cannot {} {}", method, uri.path()))
}

/// Build the full application router: health, the `/api` surface, and docs.
pub fn build_router(cors: CorsLayer, state: auth::ServerState) -> Router {
    let api = Router::new()
        .route("/services", get(services::list).post(services::create).fallback(fallback))
        .route(
            "/services/:id",
            patch(services::update).delete(services::remove).fallback(fallback),
        )
        .route("/services/:id/versions", get(services::get_with_versions).fallback(fallback))
        .route("/versions", post(versions::create).fallback(fallback))
        .route(
            "/versions/:id",
            get(versions::get).patch(versions::update).delete(versions::remove).fallback(fallback),
        )
        .route("/auth/register", post(auth::register).fallback(fallback))
        .route("/auth/login", post(auth::login).fallback(fallback))
        .route(
            "/secure-resources",
            get(secure::get_resource)
                .fallback(fallback)
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_jwt)),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
