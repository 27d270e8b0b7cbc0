//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.
//! Configuration routes are mounted twice: at the root and under `/api`,
//! the prefix browser clients have always used.

use super::super::handlers::{list_configurations, not_found, submit_configuration};
use super::super::host::ServerHost;
use axum::http::Method;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - `GET`/`POST /configurations` and `/api/configurations`
    /// - A JSON 404 fallback
    /// - Request tracing and permissive CORS on every route
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        let configuration_routes = Self::configuration_routes(host);

        Self::health_routes()
            .merge(configuration_routes.clone())
            .nest("/api", configuration_routes)
            .fallback(not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Self::cors_layer()),
            )
    }

    fn configuration_routes(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route(
                "/configurations",
                get(list_configurations).post(submit_configuration),
            )
            .with_state(host)
    }

    /// Any origin, the methods browser clients use
    fn cors_layer() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers(Any)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "prestoconfig"
        }))
    }
}
