//! # Console Notifications
//!
//! File: cli/src/common/ui/notify.rs
//!
use crate::core::host::{Notifier, NOTIFICATION_TITLE};
use tracing::{error, info};

/// Prints notifications prefixed with the tool's title.
///
/// Informational messages go to stdout; critical ones to stderr so they stay
/// visible when output is piped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn format(message: &str) -> String {
        format!("[{}] {}", NOTIFICATION_TITLE, message)
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        info!("Notification: {}", message);
        println!("{}", Self::format(message));
    }

    fn error(&self, message: &str) {
        error!("Critical notification: {}", message);
        eprintln!("{}", Self::format(message));
    }
}
