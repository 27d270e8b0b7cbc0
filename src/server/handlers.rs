//! HTTP handlers for the configuration endpoints

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use std::sync::Arc;

use crate::core::{
    ApiError, ApiResult, ConfigurationDraft, ConfigurationListing, PAGE_SIZE, PageQuery,
    SubmissionAccepted,
};
use crate::server::host::ServerHost;

/// `POST /configurations`
///
/// The body is taken as a `Result` so a malformed payload becomes a
/// 400 with the uniform error body rather than axum's plain-text rejection.
pub async fn submit_configuration(
    State(host): State<Arc<ServerHost>>,
    payload: Result<Json<ConfigurationDraft>, JsonRejection>,
) -> ApiResult<Json<SubmissionAccepted>> {
    let Json(draft) = payload.map_err(ApiError::from)?;

    let record = host.submit_configuration(&draft).await?;

    Ok(Json(SubmissionAccepted::new(record)))
}

/// `GET /configurations?page=N`
pub async fn list_configurations(
    State(host): State<Arc<ServerHost>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ConfigurationListing>> {
    let listing = host.list_configurations(query.page(), PAGE_SIZE).await?;
    Ok(Json(listing))
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
