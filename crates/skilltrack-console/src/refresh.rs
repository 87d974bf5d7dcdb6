//! Periodic skills refresh.
//!
//! [`AutoRefresh`] owns at most one background poller. The poller waits one
//! full period before its first tick and stops as soon as its
//! [`CancellationToken`] fires. An in-flight tick is dropped on
//! cancellation, so stopping never waits on a slow request.

use core::future::Future;
use core::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct AutoRefresh {
    period: Duration,
    active: Option<Ticker>,
}

impl AutoRefresh {
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            active: None,
        }
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|ticker| !ticker.handle.is_finished())
    }

    /// Spawns the poller. Returns `false`, leaving the existing poller in
    /// place, when one is already running.
    pub fn start<F, Fut>(&mut self, mut tick: F) -> bool
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            tracing::debug!("auto-refresh already running");
            return false;
        }

        let token = CancellationToken::new();
        let child = token.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = child.cancelled() => break,
                    _ = interval.tick() => tokio::select! {
                        biased;
                        () = child.cancelled() => break,
                        () = tick() => {}
                    },
                }
            }
            tracing::debug!("auto-refresh stopped");
        });

        tracing::info!(period_secs = period.as_secs_f64(), "auto-refresh started");
        self.active = Some(Ticker { token, handle });
        true
    }

    /// Cancels the poller and waits for it to exit. No-op when idle.
    pub async fn stop(&mut self) {
        if let Some(Ticker { token, handle }) = self.active.take() {
            token.cancel();
            if let Err(e) = handle.await {
                tracing::warn!("auto-refresh task ended abnormally: {e}");
            }
        }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        if let Some(ticker) = &self.active {
            ticker.token.cancel();
        }
    }
}

impl core::fmt::Debug for AutoRefresh {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoRefresh")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}
