//! Outbound email transport

use async_trait::async_trait;
use tracing::info;

use core_kernel::{DomainPort, PortError};
use domain_claims::{EmailSender, StatusEmail};

/// Email sender that writes each status email to the log
///
/// Used when no mail relay is configured.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSender;

impl DomainPort for LogEmailSender {}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: &StatusEmail) -> Result<(), PortError> {
        info!(
            recipient = %email.recipient,
            order_number = %email.order_number,
            status = %email.status,
            subject = %format!("Your claim for order {} is now {}", email.order_number, email.status),
            "Status email sent"
        );
        Ok(())
    }
}
