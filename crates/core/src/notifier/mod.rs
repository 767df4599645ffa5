//! Push notifications for submitted segments.

mod pushover;
mod types;

pub use pushover::PushoverNotifier;
pub use types::{Notification, NotifyError, Notifier};
