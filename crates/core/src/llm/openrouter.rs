use crate::config::{self, Settings};
use crate::domain::recommendation::Recommendation;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::prompt;
use crate::llm::{GenerateInput, LlmClient, Provider};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openrouter/free";

/// OpenAI-compatible chat-completions client pointed at OpenRouter.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenRouterClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openrouter_key()?.to_string();
        let base_url = config::env_string("OPENROUTER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model =
            config::env_string("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        // No timeout unless asked for; the provider decides how long a completion takes.
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config::env_u64("OPENROUTER_TIMEOUT_SECS") {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, input: &GenerateInput) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: prompt::system_prompt(),
                },
                Message {
                    role: "user",
                    content: input.flattened_text.as_str().to_string(),
                },
            ],
            temperature: prompt::TEMPERATURE,
        }
    }

    async fn create_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> anyhow::Result<(serde_json::Value, ChatCompletionResponse)> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("OpenRouter request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenRouter response body")?;
        if !status.is_success() {
            return Err(LlmDiagnosticsError::http(Provider::OpenRouter, status, text).into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse OpenRouter response JSON: {text}"))?;
        let parsed = serde_json::from_value::<ChatCompletionResponse>(raw_json.clone())
            .context("failed to decode OpenRouter response into ChatCompletionResponse")?;
        Ok((raw_json, parsed))
    }

    fn completion_text(
        raw_json: serde_json::Value,
        res: ChatCompletionResponse,
    ) -> anyhow::Result<String> {
        let diagnostics = |detail: &str, raw_json: serde_json::Value| {
            LlmDiagnosticsError::completion(Provider::OpenRouter, detail, raw_json)
        };

        // OpenRouter reports some upstream failures as 200 with an `error` object.
        if let Some(err) = res.error {
            return Err(diagnostics(&format!("provider error: {}", err.message), raw_json).into());
        }

        let Some(choice) = res.choices.into_iter().next() else {
            return Err(diagnostics("response contained no choices", raw_json).into());
        };
        match choice.message.content {
            Some(content) => Ok(content),
            None => Err(diagnostics("first choice has no message content", raw_json).into()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenRouterClient {
    fn provider(&self) -> Provider {
        Provider::OpenRouter
    }

    async fn generate_recommendation(
        &self,
        input: GenerateInput,
    ) -> anyhow::Result<Recommendation> {
        let req = self.request(&input);
        let (raw_json, res) = self.create_completion(req).await?;
        if let Some(finish_reason) = res.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            if finish_reason == "length" {
                tracing::warn!(model = %self.model, "completion truncated by max tokens");
            }
        }
        let text = Self::completion_text(raw_json, res)?;
        Ok(Recommendation::new(text))
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,

    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,

    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}
