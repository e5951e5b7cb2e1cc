use crate::config::{self, Settings};
use crate::domain::recommendation::Recommendation;
use crate::notify::Notifier;
use crate::outcome::Outcome;
use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const PARSE_MODE: &str = "Markdown";

#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let bot_token = settings.require_telegram_bot_token()?.to_string();
        let chat_id = settings.require_telegram_chat_id()?.to_string();
        let base_url = config::env_string("TELEGRAM_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs =
            config::env_u64("TELEGRAM_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build telegram http client")?;

        Ok(Self {
            http,
            base_url,
            bot_token,
            chat_id,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    fn channel_name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, recommendation: &Recommendation) -> Result<Outcome<()>> {
        let form = [
            ("chat_id", self.chat_id.as_str()),
            ("text", recommendation.as_str()),
            ("parse_mode", PARSE_MODE),
        ];

        // The URL embeds the bot token; keep it out of error messages.
        let res = self
            .http
            .post(self.url())
            .form(&form)
            .send()
            .await
            .map_err(|err| err.without_url())
            .context("Telegram sendMessage request failed")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| err.without_url())
            .context("failed to read Telegram response body")?;

        if status.is_success() {
            tracing::info!(chat_id = %self.chat_id, "message sent to Telegram");
        } else {
            tracing::error!(%status, body = %body, "error sending to Telegram");
        }

        Ok(Outcome::from_status(status, body, ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_embeds_bot_token() {
        let settings = Settings {
            telegram_bot_token: Some("123:abc".to_string()),
            telegram_chat_id: Some("-10042".to_string()),
            ..Default::default()
        };
        let notifier = TelegramNotifier::from_settings(&settings)
            .unwrap()
            .with_base_url("http://localhost:8081/");
        assert_eq!(notifier.url(), "http://localhost:8081/bot123:abc/sendMessage");
    }

    #[test]
    fn requires_chat_id() {
        let settings = Settings {
            telegram_bot_token: Some("123:abc".to_string()),
            ..Default::default()
        };
        let err = TelegramNotifier::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_CHAT_ID"));
    }
}
