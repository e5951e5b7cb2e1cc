pub mod domain;
pub mod ingest;
pub mod llm;
pub mod notify;
pub mod outcome;
pub mod pipeline;
pub mod time;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub serpapi_key: Option<String>,
        pub openrouter_key: Option<String>,
        pub telegram_bot_token: Option<String>,
        pub telegram_chat_id: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                serpapi_key: non_blank_env("SERPAPI_KEY"),
                openrouter_key: non_blank_env("OPENROUTER_KEY"),
                telegram_bot_token: non_blank_env("TELEGRAM_BOT_TOKEN"),
                telegram_chat_id: non_blank_env("TELEGRAM_CHAT_ID"),
                sentry_dsn: non_blank_env("SENTRY_DSN"),
            })
        }

        pub fn require_serpapi_key(&self) -> anyhow::Result<&str> {
            self.serpapi_key.as_deref().context("SERPAPI_KEY is required")
        }

        pub fn require_openrouter_key(&self) -> anyhow::Result<&str> {
            self.openrouter_key
                .as_deref()
                .context("OPENROUTER_KEY is required")
        }

        pub fn require_telegram_bot_token(&self) -> anyhow::Result<&str> {
            self.telegram_bot_token
                .as_deref()
                .context("TELEGRAM_BOT_TOKEN is required")
        }

        pub fn require_telegram_chat_id(&self) -> anyhow::Result<&str> {
            self.telegram_chat_id
                .as_deref()
                .context("TELEGRAM_CHAT_ID is required")
        }
    }

    fn non_blank_env(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Reads an optional numeric override such as `SERPAPI_TIMEOUT_SECS`.
    /// Unset or unparsable values yield `None`.
    pub fn env_u64(name: &str) -> Option<u64> {
        std::env::var(name).ok().and_then(|s| s.trim().parse::<u64>().ok())
    }

    /// Reads an optional string override, ignoring blank values.
    pub fn env_string(name: &str) -> Option<String> {
        non_blank_env(name)
    }

}
