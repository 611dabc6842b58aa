//! HTTP requests with an enforced upper bound on wait time.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Time budget applied when the configuration does not specify one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Error)]
pub enum FetchError {
    /// The timer won the race. The message is fixed and shown to the user
    /// verbatim, so callers can tell a slow network from a generic failure.
    #[error("time limit exceeded")]
    TimedOut,
    /// The request failed before the timer fired (DNS, connection refused,
    /// protocol errors). Never reported as a timeout.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Awaits `future` for at most `limit`.
///
/// Races the future against a timer; whichever settles first wins and the
/// loser is cancelled by drop. Returns `None` when the timer fires first.
/// Works with any future, not just network calls.
pub async fn within<T>(limit: Duration, future: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        value = future => Some(value),
        _ = tokio::time::sleep(limit) => None,
    }
}

/// Sends a prepared request, failing with [`FetchError::TimedOut`] if no
/// response arrives within `limit`.
///
/// A response that arrives in time is returned unchanged; the caller inspects
/// the status. Dropping the losing send aborts the in-flight connection, so
/// no request outlives the deadline.
pub async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    limit: Duration,
) -> Result<reqwest::Response, FetchError> {
    match within(limit, request.send()).await {
        Some(Ok(response)) => Ok(response),
        Some(Err(e)) => Err(FetchError::Transport(e)),
        None => {
            debug!(?limit, "Request exceeded its time budget");
            Err(FetchError::TimedOut)
        }
    }
}
