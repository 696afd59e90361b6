//! Tests for the identifier newtypes
//!
//! Covers creation, parsing, conversion, ordering and display formatting.

use core_kernel::{BrandId, ClaimId};
use proptest::prelude::*;
use uuid::Uuid;

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(ClaimId::new(), ClaimId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = ClaimId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = ClaimId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ClaimId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(ClaimId::prefix(), "CLM");
    }

    #[test]
    fn test_wrong_prefix_is_rejected() {
        let brand = BrandId::new();
        assert!(brand.to_string().parse::<ClaimId>().is_err());
    }
}

mod brand_id_tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let id = BrandId::new();
        assert!(id.to_string().starts_with("BRD-"));
        assert_eq!(BrandId::prefix(), "BRD");
    }

    #[test]
    fn test_uuid_round_trip_through_into() {
        let uuid = Uuid::new_v4();
        let back: Uuid = BrandId::from(uuid).into();
        assert_eq!(uuid, back);
    }
}

proptest! {
    #[test]
    fn prop_display_then_parse_is_identity(bytes in any::<[u8; 16]>()) {
        let id = ClaimId::from_uuid(Uuid::from_bytes(bytes));
        let parsed: ClaimId = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
