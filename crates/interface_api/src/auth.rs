//! Authentication and caller resolution
//!
//! Two kinds of bearer token are accepted, both HS256 JWTs signed with the
//! configured secret:
//!
//! - staff tokens carrying the `admin` role
//! - claim-access tokens issued by an anonymous lookup, carrying the ids of
//!   the claims the holder proved ownership of

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use core_kernel::ClaimId;
use domain_claims::{AnonymousSession, Caller};

/// Role granting full access to claims
pub const ADMIN_ROLE: &str = "admin";

/// Subject used for claim-access tokens
pub const CLAIM_ACCESS_SUBJECT: &str = "claim-access";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Claims the holder may fetch without a role
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claim_ids: Vec<ClaimId>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to sign token")]
    Signing,
}

/// Creates a staff token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    sign(user_id, roles, Vec::new(), secret, expiration_secs)
}

/// Creates a claim-access token for the claims granted to an anonymous session
pub fn create_claim_access_token(
    session: &AnonymousSession,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    sign(
        CLAIM_ACCESS_SUBJECT,
        Vec::new(),
        session.granted(),
        secret,
        expiration_secs,
    )
}

fn sign(
    subject: &str,
    roles: Vec<String>,
    claim_ids: Vec<ClaimId>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: subject.to_string(),
        roles,
        claim_ids,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Signing)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims.roles.iter().any(|r| r == required_role)
}

/// Turns token claims into a caller
pub fn caller_from_claims(claims: Claims) -> Caller {
    if has_role(&claims, ADMIN_ROLE) {
        Caller::admin(claims.sub)
    } else {
        Caller::Anonymous(AnonymousSession::with_grants(claims.claim_ids))
    }
}

/// Resolves the caller from an `Authorization` header value
///
/// A missing header gives an anonymous caller with no grants. So does a
/// token that fails validation, which is logged.
pub fn resolve_caller(authorization: Option<&str>, secret: &str) -> Caller {
    let Some(token) = authorization.and_then(|h| h.strip_prefix("Bearer ")) else {
        return Caller::anonymous();
    };

    match validate_token(token.trim(), secret) {
        Ok(claims) => caller_from_claims(claims),
        Err(e) => {
            warn!(error = %e, "Token validation failed, continuing as anonymous");
            Caller::anonymous()
        }
    }
}
