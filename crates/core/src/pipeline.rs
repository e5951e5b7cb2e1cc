use crate::ingest::extract::combine_text_blocks;
use crate::ingest::serpapi::SearchProvider;
use crate::llm::{GenerateInput, LlmClient};
use crate::notify::Notifier;
use crate::outcome::Outcome;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub as_of_date: NaiveDate,
    /// Search provider answered with a non-2xx status; extraction ran on its body anyway.
    pub fetch_degraded: bool,
    pub flattened_len: usize,
    pub delivered: bool,
}

/// fetch -> extract -> summarize -> notify, once, in order.
///
/// Fetch and notify status failures are logged and tolerated. Everything else
/// aborts the run before a message is sent.
pub async fn run(
    search: &dyn SearchProvider,
    llm: &dyn LlmClient,
    notifier: &dyn Notifier,
    as_of_date: NaiveDate,
) -> anyhow::Result<RunReport> {
    tracing::info!(%as_of_date, provider = search.provider_name(), "fetching search data");
    let fetched = search.fetch(as_of_date).await?;
    let fetch_degraded = !fetched.is_success();
    if let Outcome::SoftFailure { status, .. } = &fetched {
        // The error body still goes through extraction.
        tracing::warn!(%status, "search fetch failed; continuing with returned body");
    }
    let search_result = fetched.into_payload();

    tracing::info!("combining text blocks");
    let flattened = combine_text_blocks(&search_result);
    let flattened_len = flattened.len();
    if flattened.is_empty() {
        tracing::warn!("no snippets found in search response");
    }

    tracing::info!(provider = ?llm.provider(), chars = flattened_len, "analyzing with LLM");
    let recommendation = llm
        .generate_recommendation(GenerateInput::new(flattened))
        .await?;

    tracing::info!(channel = notifier.channel_name(), "sending recommendation");
    let delivered = notifier.send(&recommendation).await?.is_success();

    tracing::info!(%as_of_date, fetch_degraded, delivered, "done");
    Ok(RunReport {
        as_of_date,
        fetch_degraded,
        flattened_len,
        delivered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::Recommendation;
    use crate::domain::search::SearchResult;
    use crate::llm::Provider;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeSearch(Outcome<SearchResult>);

    #[async_trait::async_trait]
    impl SearchProvider for FakeSearch {
        fn provider_name(&self) -> &'static str {
            "fake"
        }

        async fn fetch(&self, _as_of_date: NaiveDate) -> anyhow::Result<Outcome<SearchResult>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingLlm {
        inputs: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl LlmClient for RecordingLlm {
        fn provider(&self) -> Provider {
            Provider::OpenRouter
        }

        async fn generate_recommendation(
            &self,
            input: GenerateInput,
        ) -> anyhow::Result<Recommendation> {
            self.inputs
                .lock()
                .unwrap()
                .push(input.flattened_text.as_str().to_string());
            if self.fail {
                anyhow::bail!("401 unauthorized");
            }
            Ok(Recommendation::new("*Company:* Foo (`FOO`)"))
        }
    }

    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        status: StatusCode,
    }

    impl RecordingNotifier {
        fn with_status(status: StatusCode) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                status,
            }
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        fn channel_name(&self) -> &'static str {
            "recording"
        }

        async fn send(&self, recommendation: &Recommendation) -> anyhow::Result<Outcome<()>> {
            self.sent
                .lock()
                .unwrap()
                .push(recommendation.as_str().to_string());
            Ok(Outcome::from_status(self.status, "{\"ok\":false}", ()))
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn search_ok() -> FakeSearch {
        FakeSearch(Outcome::Success(SearchResult::new(json!({
            "text_blocks": [{"snippet": "A"}, {"list": [{"snippet": "B"}, {"snippet": "C"}]}]
        }))))
    }

    #[tokio::test]
    async fn passes_flattened_text_and_completion_through_unmodified() {
        let llm = RecordingLlm::default();
        let notifier = RecordingNotifier::with_status(StatusCode::OK);

        let report = run(&search_ok(), &llm, &notifier, as_of()).await.unwrap();

        assert_eq!(*llm.inputs.lock().unwrap(), vec!["A B C".to_string()]);
        assert_eq!(
            *notifier.sent.lock().unwrap(),
            vec!["*Company:* Foo (`FOO`)".to_string()]
        );
        assert!(report.delivered);
        assert!(!report.fetch_degraded);
        assert_eq!(report.flattened_len, 5);
    }

    #[tokio::test]
    async fn degraded_fetch_still_reaches_model() {
        let search = FakeSearch(Outcome::SoftFailure {
            status: StatusCode::UNAUTHORIZED,
            detail: "{\"error\":\"Invalid API key.\"}".to_string(),
            payload: SearchResult::new(json!({"error": "Invalid API key."})),
        });
        let llm = RecordingLlm::default();
        let notifier = RecordingNotifier::with_status(StatusCode::OK);

        let report = run(&search, &llm, &notifier, as_of()).await.unwrap();

        assert!(report.fetch_degraded);
        assert_eq!(*llm.inputs.lock().unwrap(), vec![String::new()]);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejected_notification_still_completes() {
        let llm = RecordingLlm::default();
        let notifier = RecordingNotifier::with_status(StatusCode::BAD_REQUEST);

        let report = run(&search_ok(), &llm, &notifier, as_of()).await.unwrap();

        assert!(!report.delivered);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn model_failure_aborts_before_notify() {
        let llm = RecordingLlm {
            fail: true,
            ..Default::default()
        };
        let notifier = RecordingNotifier::with_status(StatusCode::OK);

        let err = run(&search_ok(), &llm, &notifier, as_of()).await.unwrap_err();

        assert!(err.to_string().contains("401"));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }
}
