//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, HeaderValue},
    Extension, Json,
};
use tracing::{debug, error};

use core_kernel::ClaimId;
use domain_claims::{AnonymousSession, Caller, Claim, ClaimFilter};

use crate::auth::create_claim_access_token;
use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Response header carrying the claim-access token issued by a lookup
pub const CLAIM_ACCESS_HEADER: &str = "x-claim-access-token";

/// Lists claims (admin) or looks up a customer's claims (anonymous)
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(mut caller): Extension<Caller>,
    Query(params): Query<ClaimsQueryParams>,
) -> Result<(HeaderMap, Json<Vec<ClaimResponse>>), ApiError> {
    if let Some(ref email) = params.email {
        let order_number = params.order_number.as_deref().unwrap_or("");
        let claims = state.engine.lookup(&mut caller, order_number, email).await?;

        // the token covers this lookup's claims only
        let mut headers = HeaderMap::new();
        if !caller.is_admin() && !claims.is_empty() {
            let session = AnonymousSession::with_grants(claims.iter().map(Claim::id));
            headers.insert(CLAIM_ACCESS_HEADER, access_token_header(&state, &session)?);
        }

        let body = claims.into_iter().map(ClaimResponse::from).collect();
        return Ok((headers, Json(body)));
    }

    let filter = ClaimFilter::parse(params.status.as_deref(), params.order_number.as_deref())?;
    let claims = state.engine.list(&caller, &filter).await?;

    let body = claims.into_iter().map(ClaimResponse::from).collect();
    Ok((HeaderMap::new(), Json(body)))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_claim_id(&id)?;
    let claim = state.engine.get_by_id(&caller, id).await?;
    Ok(Json(claim.into()))
}

/// Updates claim status
///
/// The status email is dispatched in the background; the response does not
/// wait for delivery. Bodies without a string `status` are rejected as 400.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let id = parse_claim_id(&id)?;
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let status = request
        .status
        .ok_or_else(|| ApiError::BadRequest("Missing status".to_string()))?;

    let transition = state.machine.transition(&caller, id, &status).await?;
    debug!(claim_id = %id, "Status email handed to dispatcher");
    Ok(Json(transition.claim.into()))
}

fn parse_claim_id(raw: &str) -> Result<ClaimId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid claim id: {}", raw)))
}

fn access_token_header(
    state: &AppState,
    session: &AnonymousSession,
) -> Result<HeaderValue, ApiError> {
    let token = create_claim_access_token(
        session,
        &state.config.jwt_secret,
        state.config.claim_token_ttl_secs,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to issue claim-access token");
        ApiError::Internal(e.to_string())
    })?;

    HeaderValue::from_str(&token).map_err(|e| ApiError::Internal(e.to_string()))
}
