use reqwest::StatusCode;

/// Result of a best-effort HTTP call.
///
/// A non-2xx status is not an error by itself: the caller gets the payload it
/// could recover plus the status, and decides whether the stage tolerates it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    SoftFailure {
        status: StatusCode,
        detail: String,
        payload: T,
    },
}

impl<T> Outcome<T> {
    pub fn from_status(status: StatusCode, detail: impl Into<String>, payload: T) -> Self {
        if status.is_success() {
            Outcome::Success(payload)
        } else {
            Outcome::SoftFailure {
                status,
                detail: detail.into(),
                payload,
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn into_payload(self) -> T {
        match self {
            Outcome::Success(payload) | Outcome::SoftFailure { payload, .. } => payload,
        }
    }
}
