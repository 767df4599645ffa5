//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{Notification, NotifyError, Notifier};

/// Mock implementation of the Notifier trait.
#[derive(Debug, Default)]
pub struct MockNotifier {
    /// Notifications delivered so far.
    sent: Arc<RwLock<Vec<Notification>>>,
    /// When set, every notification is rejected.
    failing: Arc<RwLock<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all delivered notifications.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    /// Reject every notification while `failing` is true.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if *self.failing.read().await {
            return Err(NotifyError::Rejected("mock notifier failing".to_string()));
        }
        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}
