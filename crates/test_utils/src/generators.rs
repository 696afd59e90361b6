//! Property-Based Test Generators
//!
//! Proptest strategies for claim data, plus `fake`-based random claims for
//! tests that need realistic looking records rather than shrinking.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimDetails, ClaimStatus};
use fake::faker::address::en::{CityName, StreetName, ZipCode};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;

use crate::builders::ClaimBuilder;

/// Strategy for generating any claim status
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::InProgress),
        Just(ClaimStatus::Resolved),
        Just(ClaimStatus::Rejected),
    ]
}

/// Strategy for generating status labels that are not recognized
pub fn unknown_status_label_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,12}".prop_filter("must not be a known label", |s| {
        s.parse::<ClaimStatus>().is_err()
    })
}

/// Strategy for generating ClaimId
pub fn claim_id_strategy() -> impl Strategy<Value = ClaimId> {
    any::<[u8; 16]>().prop_map(|bytes| ClaimId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating order numbers such as "A-0042" or "order42"
pub fn order_number_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,6}-?[0-9]{1,5}"
}

/// Strategy for generating valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{5,10}", "[a-z]{3,8}")
        .prop_map(|(local, domain)| format!("{}@{}.com", local, domain))
}

/// Strategy for generating submission timestamps within 2024
pub fn submission_date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365 * 24 * 60).prop_map(|minutes| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    })
}

/// Strategy for generating claims with varied keys and statuses
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        order_number_strategy(),
        email_strategy(),
        claim_status_strategy(),
        submission_date_strategy(),
    )
        .prop_map(|(order_number, email, status, submitted)| {
            ClaimBuilder::new()
                .with_order_number(order_number)
                .with_email(email)
                .with_status(status)
                .with_submission_date(submitted)
                .build()
        })
}

/// A claim with randomly generated, realistic customer details
pub fn fake_claim() -> Claim {
    let details = ClaimDetails {
        order_number: format!("W-{}", (1000..99999).fake::<u32>()),
        email: SafeEmail().fake(),
        name: Name().fake(),
        street: Some(StreetName().fake()),
        postal_code: Some(ZipCode().fake()),
        city: Some(CityName().fake()),
        phone_number: PhoneNumber().fake(),
        brand: "Acme".to_string(),
        problem_description: Sentence(4..10).fake(),
    };

    ClaimBuilder::new()
        .with_details(details)
        .with_submission_date(Utc::now())
        .build()
}
