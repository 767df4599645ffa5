//! Mock magnet resolver for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::resolver::{is_magnet_link, MagnetResolver, ResolveError};

/// Mock implementation of the MagnetResolver trait.
///
/// Magnet locators resolve to themselves; any other locator resolves to
/// `magnet:?xt=urn:btih:<locator>` unless it was marked as failing.
#[derive(Debug, Default)]
pub struct MockResolver {
    /// Locators that fail to resolve.
    failing: Arc<RwLock<HashSet<String>>>,
    /// Every locator passed to `resolve`, in call order.
    attempts: Arc<RwLock<Vec<String>>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make resolution of `locator` fail.
    pub async fn fail_for(&self, locator: impl Into<String>) {
        self.failing.write().await.insert(locator.into());
    }

    /// Locators resolution was attempted for.
    pub async fn attempts(&self) -> Vec<String> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl MagnetResolver for MockResolver {
    async fn resolve(&self, locator: &str) -> Result<String, ResolveError> {
        self.attempts.write().await.push(locator.to_string());

        if self.failing.read().await.contains(locator) {
            return Err(ResolveError::NoMagnetLink(locator.to_string()));
        }

        if is_magnet_link(locator) {
            Ok(locator.to_string())
        } else {
            Ok(format!("magnet:?xt=urn:btih:{}", locator))
        }
    }
}
