use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

/// Model-provider failure with whatever the provider sent back.
#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    /// `http` for non-2xx responses, `completion` for unusable 2xx bodies.
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    pub fn http(provider: Provider, status: reqwest::StatusCode, body: String) -> Self {
        Self {
            provider,
            stage: "http",
            detail: format!("status={status}"),
            raw_response_json: serde_json::from_str::<Value>(&body).ok(),
            raw_output: Some(body),
        }
    }

    pub fn completion(provider: Provider, detail: impl Into<String>, raw_json: Value) -> Self {
        Self {
            provider,
            stage: "completion",
            detail: detail.into(),
            raw_output: None,
            raw_response_json: Some(raw_json),
        }
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LLM error (provider={:?}, stage={}): {}",
            self.provider, self.stage, self.detail
        )?;
        if let Some(raw) = self.raw_output.as_deref().filter(|s| !s.is_empty()) {
            write!(f, "; body={raw}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LlmDiagnosticsError {}
