//! Emergency-contact collaborators.
//!
//! Nothing here delivers anything yet. [`LoggingChannel`] records the
//! request and reports success so callers can be wired up ahead of a real
//! SMS/voice provider.

use std::future::Future;

use alibi_core::models::contact::EmergencyContact;
use tracing::info;

pub trait EmergencyChannel {
    /// Returns whether the message was accepted for delivery.
    fn send_message(
        &self,
        contact: &EmergencyContact,
        message: &str,
    ) -> impl Future<Output = bool> + Send;

    /// Returns whether the call was initiated.
    fn initiate_call(&self, contact: &EmergencyContact) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingChannel;

impl EmergencyChannel for LoggingChannel {
    async fn send_message(&self, contact: &EmergencyContact, message: &str) -> bool {
        info!(
            contact.name = %contact.name,
            contact.phone = %contact.phone_number,
            message,
            "sending emergency message (not delivered: no provider configured)"
        );
        true
    }

    async fn initiate_call(&self, contact: &EmergencyContact) -> bool {
        info!(
            contact.name = %contact.name,
            contact.phone = %contact.phone_number,
            "initiating emergency call (not placed: no provider configured)"
        );
        true
    }
}
