//! Custom Assertions
//!
//! Assertion helpers for claim listings with descriptive failure messages.

use std::collections::BTreeSet;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus};

/// Asserts that every claim has the expected status
pub fn assert_all_status(claims: &[Claim], expected: ClaimStatus) {
    for claim in claims {
        assert_eq!(
            claim.status(),
            expected,
            "Claim {} has status {}, expected {}",
            claim.id(),
            claim.status(),
            expected
        );
    }
}

/// Asserts that claims come back ordered by submission date, then id
pub fn assert_listing_order(claims: &[Claim]) {
    for pair in claims.windows(2) {
        let key = |c: &Claim| (c.submission_date(), c.id());
        assert!(
            key(&pair[0]) <= key(&pair[1]),
            "Claim {} listed before older claim {}",
            pair[0].id(),
            pair[1].id()
        );
    }
}

/// Asserts that the listing holds exactly the given claim ids, in any order
pub fn assert_same_claims(claims: &[Claim], expected: &[ClaimId]) {
    let actual: BTreeSet<ClaimId> = claims.iter().map(Claim::id).collect();
    let expected: BTreeSet<ClaimId> = expected.iter().copied().collect();
    assert_eq!(
        actual, expected,
        "Listing differs: got {:?}, expected {:?}",
        actual, expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ClaimFixtures;

    #[test]
    fn test_fixture_listing_is_ordered() {
        assert_listing_order(&ClaimFixtures::mixed());
    }

    #[test]
    #[should_panic(expected = "listed before older claim")]
    fn test_reversed_listing_fails() {
        let mut claims = ClaimFixtures::mixed();
        claims.reverse();
        assert_listing_order(&claims);
    }

    #[test]
    fn test_same_claims_ignores_order() {
        let claims = ClaimFixtures::mixed();
        let mut ids: Vec<ClaimId> = claims.iter().map(Claim::id).collect();
        ids.reverse();
        assert_same_claims(&claims, &ids);
    }
}
