//! # Notify Module
//!
//! The outbound message boundary.
//!
//! The core hands a finished report to a rendering step and the rendered
//! message to a [`Notifier`]. Real mail transports live outside this
//! crate; the in-repo implementation logs the message, which is enough for
//! the CLI and for tests.

use crate::core::report::{render_html, render_text, ScanReport, StorageQuota};
use crate::error::NotifyError;
use tracing::info;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub text_body: String,
    /// Optional HTML alternative body.
    pub html_body: Option<String>,
}

/// Delivers a message to a recipient address.
pub trait Notifier: Send + Sync {
    fn send(&self, recipient: &str, message: &Message) -> Result<(), NotifyError>;
}

/// A notifier that writes the message to the log instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn send(&self, recipient: &str, message: &Message) -> Result<(), NotifyError> {
        info!(
            recipient,
            subject = %message.subject,
            "delivering report message"
        );
        info!("\n{}", message.text_body);
        Ok(())
    }
}

/// Build the report message from a finished scan.
pub fn report_message(report: &ScanReport, quota: Option<&StorageQuota>) -> Message {
    Message {
        subject: "Drive Reaper Report".to_string(),
        text_body: render_text(report, quota),
        html_body: Some(render_html(report, quota)),
    }
}
