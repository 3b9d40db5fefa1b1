//! Single-flight coordination for token refresh.

use crate::error::ApiError;

use async_lock::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ensures concurrent `401`s share one refresh.
///
/// Every request records the [`epoch`](Self::epoch) it was sent under. On
/// `401` it calls [`run`](Self::run) with that epoch: the first caller through
/// the lock performs the refresh and bumps the epoch; callers that were
/// queued behind it see a newer epoch and take the recorded outcome instead
/// of refreshing again.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
    epoch: AtomicU64,
    last_outcome: Mutex<Option<Result<(), ApiError>>>,
}

impl RefreshGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of refreshes completed so far.
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub(crate) async fn run<F, Fut>(&self, observed_epoch: u64, refresh: F) -> Result<(), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        let mut last = self.last_outcome.lock().await;

        if self.epoch.load(Ordering::Acquire) != observed_epoch {
            tracing::debug!(observed_epoch, "Joining completed token refresh");
            return last.clone().unwrap_or(Ok(()));
        }

        tracing::debug!(observed_epoch, "Starting token refresh");
        let outcome = refresh().await;
        *last = Some(outcome.clone());
        self.epoch.fetch_add(1, Ordering::AcqRel);
        outcome
    }
}
