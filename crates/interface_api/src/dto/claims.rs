//! Claims DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus};

/// Query string of `GET /api/claims`
///
/// Presence of `email` selects the anonymous lookup; otherwise the request
/// is an admin listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsQueryParams {
    pub status: Option<String>,
    pub order_number: Option<String>,
    pub email: Option<String>,
}

/// Body of `PATCH /api/claims/:id`
///
/// `status` is optional here so that a missing or null value is reported
/// as a bad request rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub order_number: String,
    pub email: String,
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// "street, postal code city", or null unless all three parts are present
    pub formatted_address: Option<String>,
    pub phone_number: String,
    pub brand: String,
    pub problem_description: String,
    pub status: ClaimStatus,
    pub submission_date: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        let id = claim.id();
        let status = claim.status();
        let submission_date = claim.submission_date();
        let details = claim.details().clone();
        let formatted_address = details.postal_address().map(|address| address.to_string());

        Self {
            id,
            order_number: details.order_number,
            email: details.email,
            name: details.name,
            street: details.street,
            postal_code: details.postal_code,
            city: details.city,
            formatted_address,
            phone_number: details.phone_number,
            brand: details.brand,
            problem_description: details.problem_description,
            status,
            submission_date,
        }
    }
}
