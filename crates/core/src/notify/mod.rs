pub mod telegram;

use crate::domain::recommendation::Recommendation;
use crate::outcome::Outcome;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    fn channel_name(&self) -> &'static str;

    /// Best effort: a rejected message is `Outcome::SoftFailure`, never an `Err`.
    /// Transport failures still propagate.
    async fn send(&self, recommendation: &Recommendation) -> anyhow::Result<Outcome<()>>;
}
