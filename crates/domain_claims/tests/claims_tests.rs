//! Tests for the claims core: lifecycle, queries, access and dispatch

use std::sync::Arc;

use proptest::prelude::*;

use core_kernel::ClaimId;
use domain_claims::mock::{InMemoryClaimStore, RecordingEmailSender};
use domain_claims::{
    Caller, Claim, ClaimError, ClaimFilter, ClaimQueryEngine, ClaimStatus, ClaimStatusMachine,
    ClaimStore, DispatchOutcome, NotificationDispatchCoordinator, RequestLanguage, StatusEmail,
};
use test_utils::{
    assert_all_status, assert_listing_order, assert_same_claims, claim_status_strategy,
    claim_strategy, fake_claim, BrandBuilder, ClaimBuilder, TemporalFixtures,
};

struct Harness {
    store: InMemoryClaimStore,
    sender: RecordingEmailSender,
    machine: ClaimStatusMachine,
    engine: ClaimQueryEngine,
}

fn harness_with(store: InMemoryClaimStore, sender: RecordingEmailSender) -> Harness {
    let shared: Arc<dyn ClaimStore> = Arc::new(store.clone());
    Harness {
        machine: ClaimStatusMachine::new(
            Arc::clone(&shared),
            NotificationDispatchCoordinator::new(Arc::new(sender.clone())),
        ),
        engine: ClaimQueryEngine::new(shared),
        store,
        sender,
    }
}

async fn harness(claims: Vec<Claim>) -> Harness {
    harness_with(InMemoryClaimStore::with_claims(claims).await, RecordingEmailSender::new())
}

// ============================================================================
// Status machine
// ============================================================================

mod status_machine_tests {
    use super::*;

    #[tokio::test]
    async fn test_every_status_is_persisted_as_requested() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let id = c.id();
        let h = harness(vec![c]).await;
        let admin = Caller::admin("ops");

        for status in ClaimStatus::ALL {
            let transition = h.machine.transition(&admin, id, status.as_str()).await.unwrap();
            assert_eq!(transition.claim.status(), status);
            assert_eq!(h.store.find_claim_by_id(id).await.unwrap().status(), status);
        }
    }

    #[tokio::test]
    async fn test_terminal_states_can_be_left() {
        let c = ClaimBuilder::new().with_order_number("A1").with_status(ClaimStatus::Rejected).build();
        let id = c.id();
        let h = harness(vec![c]).await;

        let transition = h.machine.transition(&Caller::admin("ops"), id, "Pending").await.unwrap();
        assert_eq!(transition.claim.status(), ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_submission_date_survives_transition() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let (id, submitted) = (c.id(), c.submission_date());
        let h = harness(vec![c]).await;

        let transition = h.machine.transition(&Caller::admin("ops"), id, "Resolved").await.unwrap();
        assert_eq!(transition.claim.submission_date(), submitted);
    }

    #[tokio::test]
    async fn test_invalid_status_leaves_store_untouched() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let id = c.id();
        let h = harness(vec![c]).await;

        let err = h
            .machine
            .transition(&Caller::admin("ops"), id, "resolved")
            .await
            .unwrap_err();

        assert!(matches!(err, ClaimError::InvalidStatus(ref s) if s == "resolved"));
        assert_eq!(h.store.find_claim_by_id(id).await.unwrap().status(), ClaimStatus::Pending);
        assert_eq!(h.store.status_writes(), 0);
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_store_error() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let id = c.id();
        let h = harness(vec![c]).await;
        h.store.set_unavailable(true);

        let err = h.machine.transition(&Caller::admin("ops"), id, "Resolved").await.unwrap_err();

        assert!(matches!(err, ClaimError::Store(_)));
        assert!(h.sender.sent().await.is_empty());
    }
}

// ============================================================================
// Notification dispatch
// ============================================================================

mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_one_email_per_transition() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let id = c.id();
        let h = harness(vec![c]).await;
        let admin = Caller::admin("ops");

        for status in ["In Progress", "Resolved", "Resolved"] {
            let transition = h.machine.transition(&admin, id, status).await.unwrap();
            transition.dispatch.outcome().await;
        }

        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 3);
        assert_eq!(
            sent[0],
            StatusEmail {
                recipient: "x@y.com".to_string(),
                order_number: "A1".to_string(),
                status: ClaimStatus::InProgress,
            }
        );
        assert_eq!(h.machine.dispatcher().stats().attempted, 3);
    }

    #[tokio::test]
    async fn test_email_failure_does_not_fail_transition() {
        let c = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let id = c.id();
        let h = harness_with(
            InMemoryClaimStore::with_claims(vec![c]).await,
            RecordingEmailSender::failing(),
        );

        let transition = h
            .machine
            .transition(&Caller::admin("ops"), id, "Resolved")
            .await
            .expect("transition must succeed even if email fails");

        assert_eq!(transition.claim.status(), ClaimStatus::Resolved);
        assert!(matches!(transition.dispatch.outcome().await, DispatchOutcome::Failed(_)));
        assert_eq!(h.sender.sent().await.len(), 1);
        assert_eq!(h.machine.dispatcher().stats().failed, 1);
    }

    #[tokio::test]
    async fn test_dropped_ticket_still_delivers() {
        let c = fake_claim();
        let (id, recipient) = (c.id(), c.email().to_string());
        let h = harness(vec![c]).await;

        drop(h.machine.transition(&Caller::admin("ops"), id, "Resolved").await.unwrap());

        for _ in 0..100 {
            if !h.sender.sent().await.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        let sent = h.sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, recipient);
    }
}

// ============================================================================
// Queries and access
// ============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_requires_both_keys() {
        let first = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let second = ClaimBuilder::new().with_order_number("A1").with_email("z@y.com").build();
        let first_id = first.id();
        let h = harness(vec![first, second]).await;

        let mut caller = Caller::anonymous();
        let found = h.engine.lookup(&mut caller, "A1", "x@y.com").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), first_id);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_empty_not_error() {
        let h = harness(vec![ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build()]).await;
        let mut caller = Caller::anonymous();

        assert!(h.engine.lookup(&mut caller, "A1", "wrong@y.com").await.unwrap().is_empty());
        assert!(h.engine.lookup(&mut caller, "B2", "x@y.com").await.unwrap().is_empty());
        assert!(h.engine.lookup(&mut caller, "", "").await.unwrap().is_empty());
        assert!(caller.session().unwrap().granted().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_order_number_is_exact() {
        let h = harness(vec![
            ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build(),
        ])
        .await;
        let mut caller = Caller::anonymous();

        assert!(h.engine.lookup(&mut caller, " A1 ", "x@y.com").await.unwrap().is_empty());
        assert!(h.engine.lookup(&mut caller, "a1", "x@y.com").await.unwrap().is_empty());
        assert!(caller.session().unwrap().granted().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_email_ignores_case() {
        let h = harness(vec![ClaimBuilder::new().with_order_number("A1").with_email("Jane.Doe@Example.com").build()]).await;
        let mut caller = Caller::anonymous();

        let found = h.engine.lookup(&mut caller, "A1", "jane.doe@example.com").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_fetch_after_lookup() {
        let mine = ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build();
        let other = ClaimBuilder::new().with_order_number("B2").with_email("z@y.com").build();
        let (mine_id, other_id) = (mine.id(), other.id());
        let h = harness(vec![mine, other]).await;

        let mut caller = Caller::anonymous();
        assert!(matches!(
            h.engine.get_by_id(&caller, mine_id).await,
            Err(ClaimError::Forbidden(_))
        ));

        h.engine.lookup(&mut caller, "A1", "x@y.com").await.unwrap();

        assert_eq!(h.engine.get_by_id(&caller, mine_id).await.unwrap().id(), mine_id);
        assert!(matches!(
            h.engine.get_by_id(&caller, other_id).await,
            Err(ClaimError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_fetch_missing_claim() {
        let h = harness(vec![]).await;
        let missing = ClaimId::new();
        assert!(matches!(
            h.engine.get_by_id(&Caller::admin("ops"), missing).await,
            Err(ClaimError::NotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_anonymous_listing_is_forbidden() {
        let h = harness(vec![ClaimBuilder::new().with_order_number("A1").with_email("x@y.com").build()]).await;
        assert!(matches!(
            h.engine.list(&Caller::anonymous(), &ClaimFilter::default()).await,
            Err(ClaimError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_order_number_search_is_case_insensitive() {
        let h = harness(vec![
            ClaimBuilder::new().with_order_number("Order42").with_email("a@example.com").build(),
            ClaimBuilder::new().with_order_number("order-0042").with_email("b@example.com").build(),
            ClaimBuilder::new().with_order_number("ORD-7").with_email("c@example.com").build(),
        ])
        .await;

        let filter = ClaimFilter::parse(None, Some("42")).unwrap();
        let found = h.engine.list(&Caller::admin("ops"), &filter).await.unwrap();
        let orders: Vec<_> = found.iter().map(|c| c.order_number()).collect();
        assert_eq!(orders, vec!["Order42", "order-0042"]);
    }

    #[tokio::test]
    async fn test_status_and_search_are_conjunctive() {
        let h = harness(vec![
            ClaimBuilder::new().with_order_number("R-1").with_status(ClaimStatus::Resolved).build(),
            ClaimBuilder::new().with_order_number("R-2").with_status(ClaimStatus::Pending).build(),
            ClaimBuilder::new().with_order_number("X-3").with_status(ClaimStatus::Resolved).build(),
        ])
        .await;

        let filter = ClaimFilter::parse(Some("Resolved"), Some("r-")).unwrap();
        let found = h.engine.list(&Caller::admin("ops"), &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].order_number(), "R-1");
    }

    #[tokio::test]
    async fn test_status_filter_keeps_only_that_status() {
        let pending = ClaimBuilder::new().with_order_number("P-1").build();
        let resolved = [
            ClaimBuilder::new().with_order_number("R-1").with_status(ClaimStatus::Resolved).build(),
            ClaimBuilder::new().with_order_number("R-2").with_status(ClaimStatus::Resolved).build(),
        ];
        let expected: Vec<ClaimId> = resolved.iter().map(Claim::id).collect();
        let mut claims = vec![pending];
        claims.extend(resolved);
        let h = harness(claims).await;

        let filter = ClaimFilter::parse(Some("Resolved"), None).unwrap();
        let found = h.engine.list(&Caller::admin("ops"), &filter).await.unwrap();

        assert_all_status(&found, ClaimStatus::Resolved);
        assert_same_claims(&found, &expected);
    }

    #[tokio::test]
    async fn test_listing_order_is_stable() {
        let claims: Vec<Claim> = (0..10)
            .map(|i| {
                ClaimBuilder::new()
                    .with_order_number(format!("N{}", i))
                    .with_submission_date(TemporalFixtures::days_later(i))
                    .build()
            })
            .collect();
        let h = harness(claims).await;
        let admin = Caller::admin("ops");

        let first = h.engine.list(&admin, &ClaimFilter::default()).await.unwrap();
        let second = h.engine.list(&admin, &ClaimFilter::default()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].order_number(), "N0");
        assert_listing_order(&first);
    }

    #[tokio::test]
    async fn test_brands_resolved_for_request_language() {
        let h = harness(vec![]).await;
        let brand = BrandBuilder::new("Acme")
            .with_default_notification("Keep the box.")
            .with_notification("fr", "Gardez la boîte.")
            .build();
        h.store.insert_brand(brand).await;

        let french = RequestLanguage::negotiate(None, Some("fr-FR;q=0.9"));
        let notices = h.engine.brands(&french).await.unwrap();
        // "fr-FR" is not "fr": variants match on the exact language code
        assert_eq!(notices[0].notification, "Keep the box.");

        let notices = h.engine.brands(&RequestLanguage::negotiate(Some("fr"), None)).await.unwrap();
        assert_eq!(notices[0].notification, "Gardez la boîte.");
    }
}

// ============================================================================
// Properties
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_only_known_labels_parse(raw in "\\PC{0,16}") {
        let known = ["Pending", "In Progress", "InProgress", "Resolved", "Rejected"];
        prop_assert_eq!(raw.parse::<ClaimStatus>().is_ok(), known.contains(&raw.as_str()));
    }

    #[test]
    fn prop_listing_is_intersection_of_filters(
        claims in prop::collection::vec(claim_strategy(), 0..20),
        status in prop::option::of(claim_status_strategy()),
        needle in prop::option::of("[a-zA-Z0-9]{1,3}"),
    ) {
        let expected: Vec<ClaimId> = claims
            .iter()
            .filter(|c| status.map_or(true, |s| c.status() == s))
            .filter(|c| needle.as_ref().map_or(true, |n| {
                c.order_number().to_lowercase().contains(&n.to_lowercase())
            }))
            .map(|c| c.id())
            .collect();

        let filter = ClaimFilter { status, order_number_contains: needle };
        let found = runtime().block_on(async {
            let h = harness(claims).await;
            h.engine.list(&Caller::admin("ops"), &filter).await.unwrap()
        });

        prop_assert_eq!(found.iter().map(|c| c.id()).collect::<Vec<_>>(), expected);
    }
}
