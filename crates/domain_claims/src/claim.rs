//! Claim aggregate

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, not yet picked up
    Pending,
    /// Being handled by an administrator
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    /// Closed in the customer's favour
    Resolved,
    /// Closed without remedy
    Rejected,
}

impl ClaimStatus {
    /// Every recognized status, in workflow order
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Pending,
        ClaimStatus::InProgress,
        ClaimStatus::Resolved,
        ClaimStatus::Rejected,
    ];

    /// Returns the label used on the wire and in customer emails
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::InProgress => "In Progress",
            ClaimStatus::Resolved => "Resolved",
            ClaimStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClaimStatus::Pending),
            "In Progress" | "InProgress" => Ok(ClaimStatus::InProgress),
            "Resolved" => Ok(ClaimStatus::Resolved),
            "Rejected" => Ok(ClaimStatus::Rejected),
            other => Err(ClaimError::InvalidStatus(other.to_string())),
        }
    }
}

/// A complete postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.street, self.postal_code, self.city)
    }
}

/// Customer-supplied part of a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetails {
    /// Order number from the customer's purchase
    pub order_number: String,
    /// Contact email, also half of the anonymous lookup key
    pub email: String,
    /// Customer name
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone_number: String,
    /// Name of the brand the claim is filed against
    pub brand: String,
    pub problem_description: String,
}

impl ClaimDetails {
    /// Returns the postal address when street, postal code and city are all present
    pub fn postal_address(&self) -> Option<PostalAddress> {
        fn present(field: &Option<String>) -> Option<String> {
            field
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        }

        Some(PostalAddress {
            street: present(&self.street)?,
            postal_code: present(&self.postal_code)?,
            city: present(&self.city)?,
        })
    }
}

/// A warranty claim
///
/// The identifier, status and submission date are only readable from
/// outside the crate. Status changes go through
/// [`ClaimStatusMachine`](crate::lifecycle::ClaimStatusMachine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    id: ClaimId,
    #[serde(flatten)]
    details: ClaimDetails,
    status: ClaimStatus,
    submission_date: DateTime<Utc>,
}

impl Claim {
    /// Creates a freshly submitted claim in `Pending`
    pub fn submitted(details: ClaimDetails, submission_date: DateTime<Utc>) -> Self {
        Self {
            id: ClaimId::new_v7(),
            details,
            status: ClaimStatus::Pending,
            submission_date,
        }
    }

    /// Rebuilds a claim from stored state
    pub fn restore(
        id: ClaimId,
        details: ClaimDetails,
        status: ClaimStatus,
        submission_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            status,
            submission_date,
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn details(&self) -> &ClaimDetails {
        &self.details
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn submission_date(&self) -> DateTime<Utc> {
        self.submission_date
    }

    pub fn order_number(&self) -> &str {
        &self.details.order_number
    }

    pub fn email(&self) -> &str {
        &self.details.email
    }

    pub(crate) fn record_status(&mut self, status: ClaimStatus) {
        self.status = status;
    }
}
