//! Customer notification dispatch
//!
//! After a status transition has been committed, the coordinator emails the
//! customer from a detached task. Delivery is attempted exactly once; a
//! failure is logged and counted but never reaches the request that caused
//! the transition.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::claim::{Claim, ClaimStatus};
use crate::ports::{EmailSender, StatusEmail};

/// Why a status email did not go out
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Email to {recipient} about order {order_number} failed: {reason}")]
    Delivery {
        recipient: String,
        order_number: String,
        reason: String,
    },

    #[error("Dispatch task did not complete: {0}")]
    Aborted(String),
}

/// Result of one dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered)
    }
}

/// Handle on a detached dispatch
///
/// Dropping the ticket does not cancel the delivery.
#[derive(Debug)]
pub struct DispatchTicket {
    handle: JoinHandle<DispatchOutcome>,
}

impl DispatchTicket {
    /// Waits for the delivery attempt to finish
    pub async fn outcome(self) -> DispatchOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => DispatchOutcome::Failed(DispatchError::Aborted(e.to_string())),
        }
    }
}

/// Snapshot of the dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStats {
    pub attempted: u64,
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct DispatchCounters {
    attempted: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Hands committed transitions to the email transport
#[derive(Clone)]
pub struct NotificationDispatchCoordinator {
    sender: Arc<dyn EmailSender>,
    counters: Arc<DispatchCounters>,
}

impl NotificationDispatchCoordinator {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self {
            sender,
            counters: Arc::new(DispatchCounters::default()),
        }
    }

    /// Emails the claim's owner about `status`
    ///
    /// Must be called from within a tokio runtime, and only once the new
    /// status is durably stored.
    pub fn dispatch(&self, claim: &Claim, status: ClaimStatus) -> DispatchTicket {
        let email = StatusEmail {
            recipient: claim.email().to_string(),
            order_number: claim.order_number().to_string(),
            status,
        };
        let claim_id = claim.id();
        let sender = Arc::clone(&self.sender);
        let counters = Arc::clone(&self.counters);

        counters.attempted.fetch_add(1, Ordering::Relaxed);

        let handle = tokio::spawn(async move {
            match sender.send(&email).await {
                Ok(()) => {
                    counters.delivered.fetch_add(1, Ordering::Relaxed);
                    info!(
                        claim_id = %claim_id,
                        recipient = %email.recipient,
                        status = %email.status,
                        "Status update email sent"
                    );
                    DispatchOutcome::Delivered
                }
                Err(e) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        claim_id = %claim_id,
                        recipient = %email.recipient,
                        status = %email.status,
                        error = %e,
                        "Status update email failed"
                    );
                    DispatchOutcome::Failed(DispatchError::Delivery {
                        recipient: email.recipient,
                        order_number: email.order_number,
                        reason: e.to_string(),
                    })
                }
            }
        });

        DispatchTicket { handle }
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            attempted: self.counters.attempted.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}
