//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::{DateTime, Utc};
use core_kernel::{BrandId, ClaimId};
use domain_claims::{Brand, Claim, ClaimDetails, ClaimStatus};

use crate::fixtures::{CustomerFixtures, TemporalFixtures};

/// Builder for claims
pub struct ClaimBuilder {
    id: ClaimId,
    details: ClaimDetails,
    status: ClaimStatus,
    submission_date: DateTime<Utc>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            details: ClaimDetails {
                order_number: CustomerFixtures::order_number().to_string(),
                email: CustomerFixtures::email().to_string(),
                name: "Jane Doe".to_string(),
                street: Some("Rue de la Loi 16".to_string()),
                postal_code: Some("1000".to_string()),
                city: Some("Brussels".to_string()),
                phone_number: "+32 2 555 01 01".to_string(),
                brand: "Acme".to_string(),
                problem_description: "Stopped charging after two weeks".to_string(),
            },
            status: ClaimStatus::Pending,
            submission_date: TemporalFixtures::first_submission(),
        }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.id = id;
        self
    }

    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.details.order_number = order_number.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.details.email = email.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.details.name = name.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.details.brand = brand.into();
        self
    }

    /// Removes the postal address
    pub fn without_address(mut self) -> Self {
        self.details.street = None;
        self.details.postal_code = None;
        self.details.city = None;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_submission_date(mut self, date: DateTime<Utc>) -> Self {
        self.submission_date = date;
        self
    }

    /// Replaces all customer-supplied fields at once
    pub fn with_details(mut self, details: ClaimDetails) -> Self {
        self.details = details;
        self
    }

    pub fn build(self) -> Claim {
        Claim::restore(self.id, self.details, self.status, self.submission_date)
    }
}

/// Builder for brands
pub struct BrandBuilder {
    id: BrandId,
    name: String,
    default_notification: Option<String>,
    notifications: Vec<(String, String)>,
}

impl BrandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BrandId::new(),
            name: name.into(),
            default_notification: None,
            notifications: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: BrandId) -> Self {
        self.id = id;
        self
    }

    pub fn with_default_notification(mut self, text: impl Into<String>) -> Self {
        self.default_notification = Some(text.into());
        self
    }

    pub fn with_notification(
        mut self,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.notifications.push((language.into(), content.into()));
        self
    }

    /// Builds the brand
    ///
    /// # Panics
    ///
    /// Panics if two notices share a language.
    pub fn build(self) -> Brand {
        let mut brand = Brand::new(self.id, self.name);
        if let Some(text) = self.default_notification {
            brand = brand.with_default_notification(text);
        }
        for (language, content) in self.notifications {
            brand
                .add_notification(language, content)
                .expect("duplicate notice language in test brand");
        }
        brand
    }
}
