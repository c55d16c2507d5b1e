// ── Controller ──
//
// Facade owning one poller per panel plus the dispatcher and submitter.
// The CLI and TUI only ever talk to this type.

use std::collections::BTreeMap;
use std::sync::Arc;

use homewatch_api::HomeClient;
use strum::IntoEnumIterator;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::backend::{Backend, Feed};
use crate::config::ClientConfig;
use crate::dispatch::{CommandDispatcher, DispatchOutcome};
use crate::error::CoreError;
use crate::model::{AuthenticatedAction, Command};
use crate::panel::{PanelId, PanelView};
use crate::poller::{PollerHandle, TickOutcome};
use crate::submit::{ActionSubmitter, SubmitOutcome};

/// Cheaply cloneable handle; all clones share the same pollers.
pub struct Controller<B: Backend = HomeClient> {
    inner: Arc<ControllerInner<B>>,
}

impl<B: Backend> Clone for Controller<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<B: Backend> {
    config: ClientConfig,
    pollers: BTreeMap<PanelId, PollerHandle<B>>,
    dispatcher: CommandDispatcher<B>,
    submitter: ActionSubmitter<B>,
}

impl Controller<HomeClient> {
    /// Build an HTTP-backed controller. Nothing is fetched until
    /// [`start`](Self::start) or [`poll_now`](Self::poll_now).
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let client = HomeClient::new(config.url.clone(), &config.transport())?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }
}

impl<B: Backend> Controller<B> {
    pub fn with_backend(config: ClientConfig, backend: Arc<B>) -> Self {
        let pollers = PanelId::iter()
            .map(|panel| {
                let poller = PollerHandle::new(
                    Arc::clone(&backend),
                    panel,
                    Feed::for_panel(panel, &config.series_window),
                    config.interval_for(panel),
                    config.table_rows,
                );
                let poller = if config.panel_enabled(panel) {
                    poller
                } else {
                    poller.with_initial_view(PanelView::disabled(panel))
                };
                (panel, poller)
            })
            .collect();

        Self {
            inner: Arc::new(ControllerInner {
                dispatcher: CommandDispatcher::new(Arc::clone(&backend)),
                submitter: ActionSubmitter::new(Arc::clone(&backend)),
                pollers,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // ── Polling lifecycle ────────────────────────────────────────────

    /// Start every enabled poller. Disabled panels stay idle.
    pub fn start(&self) {
        for (panel, poller) in &self.inner.pollers {
            if self.inner.config.panel_enabled(*panel) {
                poller.start();
            } else {
                debug!(%panel, "panel disabled, not polling");
            }
        }
        info!(url = %self.inner.config.url, "polling started");
    }

    /// Stop every schedule. Requests already in flight still land.
    pub fn stop(&self) {
        for poller in self.inner.pollers.values() {
            poller.stop();
        }
        info!("polling stopped");
    }

    pub fn is_polling(&self, panel: PanelId) -> bool {
        self.poller(panel).is_running()
    }

    /// Live view of one panel.
    pub fn panel(&self, panel: PanelId) -> watch::Receiver<PanelView> {
        self.poller(panel).subscribe()
    }

    pub fn snapshot(&self, panel: PanelId) -> PanelView {
        self.poller(panel).view()
    }

    /// One immediate tick for `panel`, whether or not its schedule runs.
    pub fn poll_now(&self, panel: PanelId) -> JoinHandle<TickOutcome> {
        self.poller(panel).poll_now()
    }

    fn poller(&self, panel: PanelId) -> &PollerHandle<B> {
        // Every PanelId gets a poller in `with_backend`.
        &self.inner.pollers[&panel]
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn dispatch(&self, command: Command) -> DispatchOutcome {
        self.inner.dispatcher.dispatch(command).await
    }

    /// Submit a form action; on success the affected panel is re-polled
    /// before this returns.
    pub async fn submit(&self, action: AuthenticatedAction) -> SubmitOutcome {
        let outcome = self.inner.submitter.submit(action).await;
        if let Some(panel) = outcome.repoll {
            // The tick logs its own failure; nothing to add here.
            let _ = self.poll_now(panel).await;
        }
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{NodeId, Switch};
    use crate::panel::PanelStatus;
    use crate::submit::SubmitPhase;
    use crate::testing::FakeBackend;
    use secrecy::SecretString;
    use serde_json::json;
    use std::time::Duration;

    fn controller(config: ClientConfig) -> (Arc<FakeBackend>, Controller<FakeBackend>) {
        let backend = Arc::new(FakeBackend::new(json!({})));
        (Arc::clone(&backend), Controller::with_backend(config, backend))
    }

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn entry_panel_is_disabled_by_default() {
        let (backend, ctrl) = controller(ClientConfig::default());
        ctrl.start();
        settle().await;

        assert_eq!(ctrl.snapshot(PanelId::Entry).status, PanelStatus::Disabled);
        assert!(!ctrl.is_polling(PanelId::Entry));
        assert!(ctrl.is_polling(PanelId::Kitchen));

        let fetches = backend.fetches();
        assert_eq!(fetches.len(), 5);
        assert!(!fetches.contains(&Feed::Node(NodeId::Entry)));
        assert!(fetches.contains(&Feed::PeopleSeries {
            window: "1m".into()
        }));
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn entry_panel_polls_when_enabled() {
        let (backend, ctrl) = controller(ClientConfig {
            entry_enabled: true,
            ..ClientConfig::default()
        });
        ctrl.start();
        settle().await;

        assert!(backend.fetches().contains(&Feed::Node(NodeId::Entry)));
        assert_eq!(ctrl.snapshot(PanelId::Entry).status, PanelStatus::Live);
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn alarm_and_node_panels_use_their_own_cadence() {
        let (backend, ctrl) = controller(ClientConfig::default());
        ctrl.start();
        settle().await;

        tokio::time::advance(Duration::from_secs(3)).await;
        settle().await;
        let count = |feed: &Feed| backend.fetches().iter().filter(|f| *f == feed).count();
        assert_eq!(count(&Feed::Node(NodeId::Kitchen)), 2);
        assert_eq!(count(&Feed::AlarmState), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(count(&Feed::AlarmState), 2);
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submit_repolls_affected_panel() {
        let (backend, ctrl) = controller(ClientConfig::default());

        let outcome = ctrl
            .submit(AuthenticatedAction::Arm {
                pin: SecretString::from("1234".to_owned()),
            })
            .await;

        assert_eq!(outcome.repoll, Some(PanelId::AlarmState));
        assert_eq!(backend.fetches(), vec![Feed::AlarmState]);
        assert_eq!(ctrl.snapshot(PanelId::AlarmState).status, PanelStatus::Live);
    }

    #[tokio::test]
    async fn empty_pin_ends_rejected_without_traffic() {
        let (backend, ctrl) = controller(ClientConfig::default());

        let outcome = ctrl
            .submit(AuthenticatedAction::Disarm {
                pin: SecretString::from("   ".to_owned()),
            })
            .await;

        assert_eq!(outcome.phase, SubmitPhase::Rejected);
        assert_eq!(outcome.feedback.message, "Enter PIN.");
        assert_eq!(outcome.repoll, None);
        assert!(backend.submits().is_empty());
        assert!(backend.fetches().is_empty());
    }

    #[tokio::test]
    async fn dispatch_goes_straight_to_backend() {
        let (backend, ctrl) = controller(ClientConfig::default());
        assert!(ctrl.dispatch(Command::Light(Switch::On)).await.is_sent());
        assert_eq!(backend.commands(), vec![Command::Light(Switch::On)]);
        assert!(backend.fetches().is_empty());
    }
}
