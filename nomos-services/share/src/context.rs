// std
use std::future::Future;
use std::time::Duration;
// crates
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
// internal
use crate::error::ShareError;

/// Per request cancellation scope: an explicit token plus an optional deadline.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Scope cancelled together with `self`, bounded by the earliest of both deadlines.
    #[must_use]
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        Self {
            token: self.token.child_token(),
            deadline: match (self.deadline, deadline) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails if the request can no longer make progress.
    pub fn check(&self) -> Result<(), ShareError> {
        if self.token.is_cancelled() {
            return Err(ShareError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(ShareError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the token is cancelled or the deadline elapses.
    /// The future is dropped on cancellation.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, ShareError>
    where
        F: Future<Output = Result<T, ShareError>>,
    {
        self.check()?;
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ShareError::Cancelled),
            _ = deadline => Err(ShareError::DeadlineExceeded),
            result = fut => result,
        }
    }
}
