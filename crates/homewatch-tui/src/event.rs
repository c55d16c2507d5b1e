//! Terminal input and the two UI clocks, merged into one stream.
//!
//! The app loop only ever sees [`Event`]; crossterm's own event type stays
//! inside this module.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    /// Ages the "updated Ns ago" labels.
    Tick,
    Render,
}

/// How often the clocks fire.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    pub tick: Duration,
    pub render: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(250),
            render: Duration::from_millis(33),
        }
    }
}

/// Receiving end of the merged stream. The pump task stops when `cancel`
/// fires or this reader is dropped.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn(cadence: Cadence, cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump(tx, cadence, cancel.clone()));
        Self { rx, cancel }
    }

    /// `None` once the pump has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, cadence: Cadence, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut tick = clock(cadence.tick);
    let mut render = clock(cadence.render);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// A slow frame should not trigger a burst of catch-up ticks.
fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Key presses and resizes. Releases, repeats, mouse and focus are dropped.
fn translate(raw: TermEvent) -> Option<Event> {
    match raw {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    }
}
