//! Data bridge: forwards the controller's panel channels to TUI actions.
//!
//! Runs as a background task. Starts the pollers, sends each panel's
//! current view so screens render immediately, then forwards every change
//! until cancelled.

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use homewatch_core::{Controller, PanelId, PanelView};

use crate::action::Action;

fn forward(rx: &mut watch::Receiver<PanelView>, action_tx: &mpsc::UnboundedSender<Action>) {
    let view = rx.borrow_and_update().clone();
    debug!(panel = %view.panel, tick = view.tick, "dispatching PanelUpdated");
    let _ = action_tx.send(Action::PanelUpdated(view));
}

pub async fn spawn_data_bridge(
    controller: Controller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut alarm = controller.panel(PanelId::AlarmState);
    let mut series = controller.panel(PanelId::PeopleSeries);
    let mut events = controller.panel(PanelId::AlarmEvents);
    let mut entry = controller.panel(PanelId::Entry);
    let mut kitchen = controller.panel(PanelId::Kitchen);
    let mut bedroom = controller.panel(PanelId::Bedroom);

    for rx in [
        &mut alarm,
        &mut series,
        &mut events,
        &mut entry,
        &mut kitchen,
        &mut bedroom,
    ] {
        forward(rx, &action_tx);
    }

    controller.start();

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = alarm.changed() => forward(&mut alarm, &action_tx),
            Ok(()) = series.changed() => forward(&mut series, &action_tx),
            Ok(()) = events.changed() => forward(&mut events, &action_tx),
            Ok(()) = entry.changed() => forward(&mut entry, &action_tx),
            Ok(()) = kitchen.changed() => forward(&mut kitchen, &action_tx),
            Ok(()) = bedroom.changed() => forward(&mut bedroom, &action_tx),

            else => break,
        }
    }

    controller.stop();
    debug!("data bridge shut down");
}
