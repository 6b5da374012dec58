//! Refresh Coordinator
//!
//! Two-state machine (`Fresh` / `Refreshing`) that lets concurrent callers
//! share one in-flight token refresh.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

/// Result of a refresh, shared by every caller that joined it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New pair persisted; retry with this access token
    Refreshed { access_token: String },
    /// Refresh rejected or failed; the store has been cleared
    Rejected,
}

type Flight = Shared<BoxFuture<'static, RefreshOutcome>>;

enum RefreshState {
    Fresh,
    Refreshing {
        /// Access token the flight is replacing
        stale_token: String,
        flight: Flight,
    },
}

/// Coalesces concurrent refreshes
///
/// Clones share state, so every pipeline built over the same store should
/// share one coordinator.
#[derive(Clone)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RefreshState::Fresh)),
        }
    }

    /// Whether a refresh is currently in flight
    pub async fn is_refreshing(&self) -> bool {
        matches!(*self.state.lock().await, RefreshState::Refreshing { .. })
    }

    /// Wait for an in-flight refresh, if any, to finish
    ///
    /// Lets new requests pick up the refreshed credential instead of
    /// sending one already known to be stale.
    pub async fn settled(&self) {
        let flight = match &*self.state.lock().await {
            RefreshState::Refreshing { flight, .. } => Some(flight.clone()),
            RefreshState::Fresh => None,
        };
        if let Some(flight) = flight {
            flight.await;
        }
    }

    /// Refresh the credential that replaced `stale_token`
    ///
    /// Joins the in-flight refresh for the same stale token, or starts one
    /// with `start`. Only the starter's `start` is ever invoked.
    pub async fn refresh<F, Fut>(&self, stale_token: &str, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let flight = {
            let mut state = self.state.lock().await;
            let joinable = match &*state {
                RefreshState::Refreshing {
                    stale_token: in_flight,
                    flight,
                } if in_flight == stale_token => Some(flight.clone()),
                _ => None,
            };

            match joinable {
                Some(flight) => {
                    tracing::debug!("Joining in-flight token refresh");
                    flight
                }
                None => {
                    let flight = start().boxed().shared();
                    *state = RefreshState::Refreshing {
                        stale_token: stale_token.to_string(),
                        flight: flight.clone(),
                    };
                    flight
                }
            }
        };

        let outcome = flight.await;

        let mut state = self.state.lock().await;
        if matches!(&*state, RefreshState::Refreshing { stale_token: t, .. } if t == stale_token) {
            *state = RefreshState::Fresh;
        }

        outcome
    }
}
