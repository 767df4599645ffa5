use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{Event, Segment};

/// Errors that can occur sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    RequestFailed(String),

    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// A push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Message announcing that a segment of `event` went to the download client.
    pub fn segment_submitted(event: &Event, segment: Segment) -> Self {
        Self::new(
            format!("{} sent to download client", segment.label()),
            event.name.clone(),
        )
    }
}

/// Capability to deliver push messages to the configured recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}
