//! Pre-built Test Fixtures
//!
//! Ready-to-use claims and brands. Values are fixed so tests can assert on
//! them directly.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_kernel::BrandId;
use domain_claims::mock::InMemoryClaimStore;
use domain_claims::{Brand, Claim, ClaimStatus};

use crate::builders::{BrandBuilder, ClaimBuilder};

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Submission time of the first fixture claim (Mar 1, 2024 09:00)
    pub fn first_submission() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    /// Submission time `n` days after the first fixture claim
    pub fn days_later(n: i64) -> DateTime<Utc> {
        Self::first_submission() + Duration::days(n)
    }
}

/// Fixture for customer data
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn email() -> &'static str {
        "jane.doe@example.com"
    }

    pub fn other_email() -> &'static str {
        "john.roe@example.com"
    }

    pub fn order_number() -> &'static str {
        "A-1001"
    }
}

/// Fixture for claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A pending claim for the fixture customer
    pub fn pending() -> Claim {
        ClaimBuilder::new().build()
    }

    /// A mixed set of claims in submission order:
    ///
    /// | order       | email        | status      |
    /// |-------------|--------------|-------------|
    /// | A-1001      | jane         | Pending     |
    /// | Order42     | jane         | In Progress |
    /// | order-0042  | john         | Resolved    |
    /// | B-7         | john         | Rejected    |
    pub fn mixed() -> Vec<Claim> {
        vec![
            ClaimBuilder::new()
                .with_submission_date(TemporalFixtures::days_later(0))
                .build(),
            ClaimBuilder::new()
                .with_order_number("Order42")
                .with_status(ClaimStatus::InProgress)
                .with_submission_date(TemporalFixtures::days_later(1))
                .build(),
            ClaimBuilder::new()
                .with_order_number("order-0042")
                .with_email(CustomerFixtures::other_email())
                .with_status(ClaimStatus::Resolved)
                .with_submission_date(TemporalFixtures::days_later(2))
                .build(),
            ClaimBuilder::new()
                .with_order_number("B-7")
                .with_email(CustomerFixtures::other_email())
                .with_status(ClaimStatus::Rejected)
                .with_submission_date(TemporalFixtures::days_later(3))
                .build(),
        ]
    }
}

/// Fixture for brands
pub struct BrandFixtures;

impl BrandFixtures {
    /// "Acme" with a default notice plus French and German variants
    pub fn acme() -> Brand {
        BrandBuilder::new("Acme")
            .with_id(BrandId::from_uuid(uuid::Uuid::from_u128(1)))
            .with_default_notification("Keep your receipt.")
            .with_notification("fr", "Conservez votre ticket.")
            .with_notification("de", "Bewahren Sie den Beleg auf.")
            .build()
    }

    /// "Globex" without any notice
    pub fn globex() -> Brand {
        BrandBuilder::new("Globex")
            .with_id(BrandId::from_uuid(uuid::Uuid::from_u128(2)))
            .build()
    }
}

/// Builds an in-memory store holding the given claims and brands
pub async fn seeded_store(claims: Vec<Claim>, brands: Vec<Brand>) -> InMemoryClaimStore {
    let store = InMemoryClaimStore::with_claims(claims).await;
    for brand in brands {
        store.insert_brand(brand).await;
    }
    store
}
