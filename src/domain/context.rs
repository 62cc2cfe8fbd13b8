use crate::domain::error::ProviderError;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-owned cancellation scope for one translation call.
///
/// Handlers derive one per inbound request with the configured timeout;
/// providers and the dispatch service only observe it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the context to `timeout` from now. An earlier deadline is kept;
    /// a timeout too large to represent leaves the context unbounded.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Context cancelled together with `self`, but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Resolves once the context ends, with the reason it ended.
    pub async fn cancelled(&self) -> ProviderError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ProviderError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ProviderError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ProviderError::Cancelled
            }
        }
    }

    pub fn check(&self) -> Result<(), ProviderError> {
        if self.token.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Err(ProviderError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
