//! Report delivery: console output or webhook POST.

use crate::config::{NotificationConfig, NotificationMethod};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::future::Future;
use std::io::Write;

/// Something that can receive a finished report.
///
/// `notify` never fails to the caller; implementations log their own errors.
pub trait ReportNotifier: Send + Sync {
    fn notify(&self, report: &str) -> impl Future<Output = ()> + Send;

    /// Whether `notify` already writes the report to the console
    fn writes_to_console(&self) -> bool {
        false
    }
}

/// Webhook request body
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Errors that can occur while delivering a report
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned status: {0}")]
    Status(StatusCode),

    #[error("Failed to write report to console: {0}")]
    Console(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq)]
enum Channel {
    Disabled,
    Console,
    Webhook(String),
}

/// Notifier built from the notification section of the config
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    channel: Channel,
}

impl Notifier {
    pub fn new(config: &NotificationConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .user_agent(concat!("weather-reminder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let channel = match (config.enabled, config.method, &config.webhook) {
            (false, _, _) => Channel::Disabled,
            (true, NotificationMethod::Console, _) => Channel::Console,
            (true, NotificationMethod::Webhook, Some(url)) => Channel::Webhook(url.clone()),
            // Rejected at config load; nothing to deliver to
            (true, NotificationMethod::Webhook, None) => Channel::Disabled,
        };

        Ok(Self { client, channel })
    }

    pub fn is_enabled(&self) -> bool {
        self.channel != Channel::Disabled
    }

    /// Deliver the report, reporting failures to the caller
    pub async fn deliver(&self, report: &str) -> Result<(), NotifyError> {
        match &self.channel {
            Channel::Disabled => Ok(()),
            Channel::Console => {
                tracing::info!(method = "console", "Notification method: console output");
                write_console(report)?;
                Ok(())
            }
            Channel::Webhook(url) => {
                tracing::info!(method = "webhook", url = %url, "Sending report to webhook");
                let response = self
                    .client
                    .post(url)
                    .json(&WebhookPayload { text: report })
                    .send()
                    .await?;

                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(NotifyError::Status(response.status()))
                }
            }
        }
    }
}

fn write_console(report: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{report}")?;
    stdout.flush()
}

impl ReportNotifier for Notifier {
    async fn notify(&self, report: &str) {
        match self.deliver(report).await {
            Ok(()) => {
                if let Channel::Webhook(url) = &self.channel {
                    tracing::info!(url = %url, "Webhook sent successfully");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Notification delivery failed");
            }
        }
    }

    fn writes_to_console(&self) -> bool {
        self.channel == Channel::Console
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, method: NotificationMethod, webhook: Option<&str>) -> NotificationConfig {
        NotificationConfig {
            enabled,
            method,
            webhook: webhook.map(str::to_string),
        }
    }

    #[test]
    fn test_channel_selection() {
        let disabled = Notifier::new(&config(false, NotificationMethod::Webhook, Some("http://x"))).unwrap();
        assert!(!disabled.is_enabled());
        assert!(!disabled.writes_to_console());

        let console = Notifier::new(&config(true, NotificationMethod::Console, None)).unwrap();
        assert!(console.is_enabled());
        assert!(console.writes_to_console());

        let webhook = Notifier::new(&config(true, NotificationMethod::Webhook, Some("http://x"))).unwrap();
        assert_eq!(webhook.channel, Channel::Webhook("http://x".to_string()));
        assert!(!webhook.writes_to_console());
    }

    #[tokio::test]
    async fn test_disabled_delivers_nothing() {
        let notifier = Notifier::new(&NotificationConfig::default()).unwrap();
        assert!(notifier.deliver("report").await.is_ok());
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(WebhookPayload { text: "hello" }).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hello" }));
    }
}
