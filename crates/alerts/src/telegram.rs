//! Telegram Bot API client and message formatting.

use crate::config::TelegramConfig;
use crate::notifier::{AlertError, AlertSink};
use async_trait::async_trait;
use ratio_core::{PairConfig, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends messages through `sendMessage` of the Telegram Bot API.
pub struct TelegramNotifier {
    config: TelegramConfig,
    http_client: reqwest::Client,
    api_url: String,
}

impl TelegramNotifier {
    pub const API_URL: &'static str = "https://api.telegram.org";

    /// Create a notifier against `api_url` (normally [`Self::API_URL`]).
    pub fn with_api_url(
        config: TelegramConfig,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AlertError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            config,
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.config.chat_id
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.config.bot_token)
    }
}

#[async_trait]
impl AlertSink for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<(), AlertError> {
        let payload = SendMessage {
            chat_id: &self.config.chat_id,
            text: message,
        };

        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(chat_id = %self.config.chat_id, "Telegram message delivered");
        Ok(())
    }
}

/// Message sent whenever either price changes.
pub fn format_ratio_update(
    ratio: Decimal,
    first: (&PairConfig, Price),
    second: (&PairConfig, Price),
) -> String {
    format!(
        "✅ Ratio: {:.2}\n{}: {}\n{}: {}",
        ratio.round_dp(2),
        first.0.label,
        first.1,
        second.0.label,
        second.1
    )
}

/// Message sent when the ratio is above the threshold.
pub fn format_threshold_alert(ratio: Decimal, threshold: Decimal) -> String {
    format!(
        "🚨 ALERT! Ratio exceeded {}: {:.4} 🚀",
        threshold,
        ratio.round_dp(4)
    )
}
