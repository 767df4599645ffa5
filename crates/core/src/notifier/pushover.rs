//! Pushover notifier implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::PushoverConfig;

use super::{Notification, NotifyError, Notifier};

/// Sends notifications through the Pushover messages API.
pub struct PushoverNotifier {
    client: Client,
    config: PushoverConfig,
}

impl PushoverNotifier {
    pub fn new(config: PushoverConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| NotifyError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn form<'a>(&'a self, notification: &'a Notification) -> [(&'static str, &'a str); 4] {
        [
            ("token", self.config.token.as_str()),
            ("user", self.config.user_key.as_str()),
            ("title", notification.title.as_str()),
            ("message", notification.message.as_str()),
        ]
    }
}

/// Pushover API response body.
#[derive(Debug, Deserialize)]
struct PushoverResponse {
    status: i32,
    #[serde(default)]
    errors: Vec<String>,
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.config.url)
            .form(&self.form(notification))
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: Option<PushoverResponse> = serde_json::from_str(&body).ok();

        match parsed {
            Some(r) if status.is_success() && r.status == 1 => {
                debug!(title = %notification.title, "Pushover notification sent");
                Ok(())
            }
            Some(r) if !r.errors.is_empty() => Err(NotifyError::Rejected(r.errors.join("; "))),
            _ => Err(NotifyError::Rejected(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> PushoverNotifier {
        PushoverNotifier::new(PushoverConfig {
            token: "app-token".to_string(),
            user_key: "user-key".to_string(),
            url: "http://127.0.0.1:9/1/messages.json".to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_form_fields() {
        let notifier = notifier();
        let n = Notification::new("Prelims sent to download client", "ufc 300");
        let form = notifier.form(&n);
        assert_eq!(form[0], ("token", "app-token"));
        assert_eq!(form[1], ("user", "user-key"));
        assert_eq!(form[2], ("title", "Prelims sent to download client"));
        assert_eq!(form[3], ("message", "ufc 300"));
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"user":"invalid","errors":["user identifier is invalid"],"status":0}"#;
        let parsed: PushoverResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status, 0);
        assert_eq!(parsed.errors, vec!["user identifier is invalid"]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        let result = notifier().notify(&Notification::new("t", "m")).await;
        assert!(matches!(result, Err(NotifyError::RequestFailed(_))));
    }
}
