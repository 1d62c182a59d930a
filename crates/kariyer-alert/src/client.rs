//! Slack webhook client.

use std::time::Duration;

use chrono::Utc;
use kariyer_common::config::AlertSettings;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

use crate::error::AlertError;
use crate::payload::{Severity, WebhookPayload};

#[derive(Clone)]
pub struct AlertClient {
    http: Client,
    webhook_url: String,
    enabled: bool,
}

impl AlertClient {
    pub fn new(settings: &AlertSettings) -> Result<Self, AlertError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("kariyer-alert/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            webhook_url: settings.webhook_url.clone(),
            enabled: settings.enabled,
        })
    }

    /// Whether posts reach the webhook at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fire-and-forget notification.
    ///
    /// Spawns the post onto the current Tokio runtime and returns at once.
    /// Does nothing when notifications are disabled or no runtime is running.
    pub fn notify(&self, message: impl Into<String>, severity: Severity, markdown: bool) {
        if !self.is_enabled() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No Tokio runtime available, dropping Slack notification");
            return;
        };

        let client = self.clone();
        let message = message.into();
        runtime.spawn(async move {
            if let Err(e) = client.send(&message, &severity, markdown).await {
                error!("Failed to send Slack message: {e}");
            }
        });
    }

    /// Post one message and wait for Slack's answer.
    ///
    /// Returns `Ok(())` without posting when notifications are disabled.
    pub async fn send(
        &self,
        message: &str,
        severity: &Severity,
        markdown: bool,
    ) -> Result<(), AlertError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let payload = WebhookPayload::new(Utc::now(), message, severity, markdown);
        let resp = self.http.post(&self.webhook_url).json(&payload).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(AlertError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(severity = severity.color(), "Slack notification delivered");
        Ok(())
    }
}
