use crate::errors::VoteError;
use crate::models::{PageState, VoteChoice, VoteReceipt, VoteStats, VoteStatus};
use crate::remote::VoteApi;
use crate::stats::derive_percentages;
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncState {
    pub stats: VoteStats,
    pub status: VoteStatus,
}

impl SyncState {
    pub fn page_state(&self) -> PageState {
        let pct = derive_percentages(&self.stats);
        PageState {
            stats: self.stats,
            status: self.status,
            boy_percent: pct.boy,
            girl_percent: pct.girl,
            can_vote: self.status == VoteStatus::NotVoted,
        }
    }
}

/// Local view of the remote tally plus the one-vote-per-session guard.
///
/// Clones share the same state cell. Every write replaces the whole
/// snapshot, so a background refresh racing a vote response resolves as
/// last-writer-wins.
#[derive(Clone)]
pub struct VoteSync {
    api: VoteApi,
    state: Arc<watch::Sender<SyncState>>,
}

impl VoteSync {
    pub fn new(api: VoteApi) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    pub fn current(&self) -> SyncState {
        *self.state.borrow()
    }

    pub fn stats(&self) -> VoteStats {
        self.current().stats
    }

    pub fn status(&self) -> VoteStatus {
        self.current().status
    }

    pub fn snapshot(&self) -> PageState {
        self.current().page_state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Pulls the tally and replaces local stats with it. Failures are logged
    /// and leave local stats untouched; the vote status is never changed here.
    pub async fn refresh_stats(&self) -> Result<VoteStats, VoteError> {
        match self.api.fetch_stats().await {
            Ok(envelope) => {
                let stats = envelope.stats;
                self.state.send_if_modified(|state| {
                    let changed = state.stats != stats;
                    state.stats = stats;
                    changed
                });
                Ok(stats)
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh vote stats");
                Err(err)
            }
        }
    }

    pub async fn cast_vote(&self, choice: VoteChoice) -> Result<VoteStats, VoteError> {
        let mut prior = VoteStatus::NotVoted;
        let claimed = self.state.send_if_modified(|state| {
            prior = state.status;
            if state.status == VoteStatus::NotVoted {
                state.status = VoteStatus::Pending;
                true
            } else {
                false
            }
        });

        if !claimed {
            debug!(%choice, status = ?prior, "vote ignored");
            return Err(match prior {
                VoteStatus::Voted => VoteError::AlreadyVoted,
                _ => VoteError::VoteInFlight,
            });
        }

        let pending = PendingGuard::new(&self.state);

        let receipt = match self.api.submit_vote(choice).await {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(%choice, error = %err, "vote submission failed");
                return Err(err);
            }
        };

        let stats = match receipt {
            VoteReceipt::Accepted(stats) => stats,
            VoteReceipt::Rejected => {
                warn!(%choice, "vote rejected by service");
                return Err(VoteError::ServerRejected);
            }
        };

        pending.accept(stats);
        info!(%choice, total = stats.total_votes, "vote accepted");
        Ok(stats)
    }

    /// Spawns the background refresh. The first refresh runs immediately.
    /// Polling lasts until the returned [`Poller`] is stopped or dropped.
    pub fn start_polling(&self, every: Duration) -> Poller {
        let every = every.max(Duration::from_millis(1));
        let sync = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let _ = sync.refresh_stats().await;
            }
        });
        debug!(period_ms = every.as_millis() as u64, "vote polling started");
        Poller { handle }
    }
}

/// Owns the polling task; the task is aborted when this is stopped or dropped.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub async fn stop(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
        debug!("vote polling stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Returns the status to `NotVoted` unless the vote was accepted, including
/// when the submitting future is dropped mid-flight.
struct PendingGuard<'a> {
    state: &'a watch::Sender<SyncState>,
    settled: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a watch::Sender<SyncState>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn accept(mut self, stats: VoteStats) {
        self.settled = true;
        self.state.send_modify(|state| {
            state.stats = stats;
            state.status = VoteStatus::Voted;
        });
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.state.send_if_modified(|state| {
            if state.status == VoteStatus::Pending {
                state.status = VoteStatus::NotVoted;
                true
            } else {
                false
            }
        });
    }
}
