//! Brand handlers

use axum::{
    extract::{Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    Json,
};

use domain_claims::RequestLanguage;

use crate::dto::brands::{BrandResponse, BrandsQueryParams};
use crate::{error::ApiError, AppState};

/// Lists brands with their notice in the request language
///
/// The language comes from `?lang=`, then `Accept-Language`, then the
/// configured default.
pub async fn list_brands(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<BrandsQueryParams>,
) -> Result<Json<Vec<BrandResponse>>, ApiError> {
    let accept_language = headers.get(ACCEPT_LANGUAGE).and_then(|h| h.to_str().ok());
    let language = RequestLanguage::negotiate_with_fallback(
        params.lang.as_deref(),
        accept_language,
        &state.config.default_language,
    );

    let brands = state.engine.brands(&language).await?;
    Ok(Json(brands.into_iter().map(BrandResponse::from).collect()))
}
