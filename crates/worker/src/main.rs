use anyhow::Context;
use clap::Parser;
use penny_core::domain::recommendation::Recommendation;
use penny_core::notify::Notifier;
use penny_core::outcome::Outcome;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "penny_worker")]
struct Args {
    /// Date interpolated into the search query (YYYY-MM-DD). Defaults to today's IST date.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Fetch and analyze, but log the recommendation instead of posting it.
    #[arg(long)]
    dry_run: bool,
}

/// Stands in for Telegram under `--dry-run`.
struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    fn channel_name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, recommendation: &Recommendation) -> anyhow::Result<Outcome<()>> {
        tracing::info!(dry_run = true, recommendation = %recommendation, "recommendation not sent");
        Ok(Outcome::Success(()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = penny_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let result = run(&settings, &args).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "penny stock run failed");
    }
    result
}

async fn run(settings: &penny_core::config::Settings, args: &Args) -> anyhow::Result<()> {
    let as_of_date =
        penny_core::time::ist::resolve_as_of_date(args.as_of_date.as_deref(), chrono::Utc::now())?;

    let search = penny_core::ingest::serpapi::SerpApiClient::from_settings(settings)?;
    let llm = penny_core::llm::openrouter::OpenRouterClient::from_settings(settings)?;

    let report = if args.dry_run {
        penny_core::pipeline::run(&search, &llm, &LogNotifier, as_of_date).await?
    } else {
        let telegram = penny_core::notify::telegram::TelegramNotifier::from_settings(settings)
            .context("telegram notifier is not configured")?;
        penny_core::pipeline::run(&search, &llm, &telegram, as_of_date).await?
    };

    tracing::info!(
        %report.as_of_date,
        fetch_degraded = report.fetch_degraded,
        flattened_len = report.flattened_len,
        delivered = report.delivered,
        "penny stock run finished"
    );
    Ok(())
}

fn init_sentry(settings: &penny_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
