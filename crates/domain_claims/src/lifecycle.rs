//! Claim status machine
//!
//! The only write path for claim status. Any of the four statuses may follow
//! any other; administrators decide the workflow.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{ClaimId, PortError};

use crate::access::{Caller, ClaimAccessGate};
use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::notification::{DispatchTicket, NotificationDispatchCoordinator};
use crate::ports::ClaimStore;

/// A committed status change
#[derive(Debug)]
pub struct Transition {
    /// The claim as stored after the change
    pub claim: Claim,
    /// The email dispatch started for this change
    pub dispatch: DispatchTicket,
}

/// Validates and commits status transitions
#[derive(Clone)]
pub struct ClaimStatusMachine {
    store: Arc<dyn ClaimStore>,
    dispatcher: NotificationDispatchCoordinator,
}

impl ClaimStatusMachine {
    pub fn new(store: Arc<dyn ClaimStore>, dispatcher: NotificationDispatchCoordinator) -> Self {
        Self { store, dispatcher }
    }

    pub fn dispatcher(&self) -> &NotificationDispatchCoordinator {
        &self.dispatcher
    }

    /// Moves a claim to the requested status
    ///
    /// The commit and the hand-off to the dispatcher run on a detached task:
    /// once started, abandoning the returned future neither interrupts the
    /// store write nor skips the notification.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not an administrator
    /// - `InvalidStatus` if `requested` is not a recognized status; nothing is written
    /// - `NotFound` if the claim does not exist
    /// - `Store` for any other store failure
    pub async fn transition(
        &self,
        caller: &Caller,
        claim_id: ClaimId,
        requested: &str,
    ) -> Result<Transition, ClaimError> {
        ClaimAccessGate::authorize_mutation(caller, claim_id)?;
        let status: ClaimStatus = requested.parse()?;

        debug!(claim_id = %claim_id, status = %status, caller = caller.subject(), "Committing status transition");

        let store = Arc::clone(&self.store);
        let dispatcher = self.dispatcher.clone();
        let commit = tokio::spawn(async move {
            let claim = store.update_claim_status(claim_id, status).await?;
            let dispatch = dispatcher.dispatch(&claim, status);
            Ok::<_, PortError>(Transition { claim, dispatch })
        });

        let transition = commit
            .await
            .map_err(|e| ClaimError::Store(PortError::internal(format!("transition task failed: {}", e))))?
            .map_err(|e| ClaimError::from_store(e, claim_id))?;

        info!(
            claim_id = %claim_id,
            status = %status,
            caller = caller.subject(),
            "Claim status updated"
        );

        Ok(transition)
    }
}
