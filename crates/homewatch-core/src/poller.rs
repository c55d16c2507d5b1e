// ── Recurring poller ──
//
// One poller per panel. Every interval tick spawns an independent fetch;
// ticks never wait for each other. Each tick carries a monotonically
// increasing id and its result is applied only if no newer tick has been
// applied already, so a slow response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::{Backend, Feed};
use crate::error::CoreError;
use crate::panel::{PanelId, PanelUpdate, PanelView, render_update};

/// How a single tick ended.
#[derive(Debug)]
pub enum TickOutcome {
    /// The panel now shows this tick's data.
    Rendered { tick: u64 },
    /// A newer tick had already been applied; this result was dropped.
    Superseded { tick: u64, applied: u64 },
    /// Fetch or decode failed; the panel keeps its previous contents.
    Failed { tick: u64, error: CoreError },
}

struct PollState<B> {
    backend: Arc<B>,
    panel: PanelId,
    feed: Feed,
    rows: usize,
    view: watch::Sender<PanelView>,
    next_tick: AtomicU64,
}

impl<B: Backend> PollState<B> {
    fn spawn_tick(self: &Arc<Self>) -> JoinHandle<TickOutcome> {
        let tick = self.next_tick.fetch_add(1, Ordering::Relaxed) + 1;
        tokio::spawn(Arc::clone(self).run_tick(tick))
    }

    async fn run_tick(self: Arc<Self>, tick: u64) -> TickOutcome {
        debug!(panel = %self.panel, tick, "poll tick");
        let update = match self.fetch_and_render().await {
            Ok(update) => update,
            Err(error) => {
                warn!(panel = %self.panel, tick, error = %error, "poll failed, keeping last view");
                return TickOutcome::Failed { tick, error };
            }
        };

        let mut applied = 0;
        let fresh = self.view.send_if_modified(|view| {
            applied = view.tick;
            if tick <= view.tick {
                return false;
            }
            view.apply(update, tick);
            true
        });

        if fresh {
            TickOutcome::Rendered { tick }
        } else {
            debug!(panel = %self.panel, tick, applied, "stale tick discarded");
            TickOutcome::Superseded { tick, applied }
        }
    }

    async fn fetch_and_render(&self) -> Result<PanelUpdate, CoreError> {
        let raw = self.backend.fetch(&self.feed).await?;
        Ok(render_update(self.panel, &raw, self.rows)?)
    }
}

/// Owned scheduler for one panel.
///
/// [`start`](Self::start) begins ticking immediately and then every
/// `interval`; [`stop`](Self::stop) cancels the schedule but lets ticks
/// already in flight finish. Dropping the handle stops it.
pub struct PollerHandle<B: Backend> {
    state: Arc<PollState<B>>,
    interval: Duration,
    running: Mutex<Option<CancellationToken>>,
}

impl<B: Backend> PollerHandle<B> {
    pub fn new(
        backend: Arc<B>,
        panel: PanelId,
        feed: Feed,
        interval: Duration,
        rows: usize,
    ) -> Self {
        let (view, _) = watch::channel(PanelView::initial(panel));
        Self {
            state: Arc::new(PollState {
                backend,
                panel,
                feed,
                rows,
                view,
                next_tick: AtomicU64::new(0),
            }),
            interval,
            running: Mutex::new(None),
        }
    }

    /// Replace the initial view, e.g. to mark a panel as disabled.
    pub(crate) fn with_initial_view(self, view: PanelView) -> Self {
        self.state.view.send_replace(view);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<PanelView> {
        self.state.view.subscribe()
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> PanelView {
        self.state.view.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Start the schedule. Returns `false` if it was already running.
    pub fn start(&self) -> bool {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.is_some() {
            return false;
        }
        let cancel = CancellationToken::new();
        tokio::spawn(poll_loop(
            Arc::clone(&self.state),
            self.interval,
            cancel.clone(),
        ));
        *running = Some(cancel);
        info!(panel = %self.state.panel, interval = ?self.interval, "poller started");
        true
    }

    /// Cancel the schedule. In-flight ticks still complete and may render.
    pub fn stop(&self) {
        let cancel = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel.cancel();
            info!(panel = %self.state.panel, "poller stopped");
        }
    }

    /// Run one extra tick now, outside the schedule. Works while stopped.
    pub fn poll_now(&self) -> JoinHandle<TickOutcome> {
        debug!(panel = %self.state.panel, "out-of-band poll");
        self.state.spawn_tick()
    }
}

impl<B: Backend> Drop for PollerHandle<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<B: Backend>(state: Arc<PollState<B>>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                drop(state.spawn_tick());
            }
        }
    }
}
