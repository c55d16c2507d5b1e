//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use homewatch_core::{AuthenticatedAction, BuzzerAction, Command, Controller, Switch};

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Cadence, Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const BEEP: Command = Command::Buzzer {
    action: BuzzerAction::Beep,
    times: 1,
    duration: 0.2,
};

/// Top-level application state and event loop.
pub struct App {
    controller: Controller,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    cancel: CancellationToken,
    bridge: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens().into_iter().collect();

        Self {
            controller,
            active_screen: ScreenId::default(),
            screens,
            running: true,
            action_tx,
            action_rx,
            cancel: CancellationToken::new(),
            bridge: None,
        }
    }

    fn focus_active_screen(&mut self) {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.focus_active_screen();

        self.bridge = Some(tokio::spawn(spawn_data_bridge(
            self.controller.clone(),
            self.action_tx.clone(),
            self.cancel.clone(),
        )));

        let mut events = EventReader::spawn(Cadence::default(), self.cancel.child_token());

        info!(url = %self.controller.config().url, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Cancels the event pump along with the bridge.
        self.shutdown().await;
        drop(tui);
        info!("TUI event loop ended");
        Ok(())
    }

    async fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(bridge) = self.bridge.take() {
            if let Err(e) = bridge.await {
                warn!(error = %e, "data bridge task failed");
            }
        }
    }

    /// Global keys first, unless the active screen has a text field open;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        let action = match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let n = c as u8 - b'0';
                match ScreenId::from_number(n) {
                    Some(target) => Action::SwitchScreen(target),
                    None => return Ok(None),
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => Action::SwitchScreen(self.active_screen.next()),
            (_, KeyCode::BackTab) => Action::SwitchScreen(self.active_screen.prev()),
            (KeyModifiers::NONE, KeyCode::Char('l')) => Action::Dispatch(Command::Light(Switch::On)),
            (_, KeyCode::Char('L')) => Action::Dispatch(Command::Light(Switch::Off)),
            (KeyModifiers::NONE, KeyCode::Char('b')) => Action::Dispatch(BEEP),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Action::Refresh,
            _ => return screen.handle_key_event(key),
        };
        Ok(Some(action))
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::Refresh => {
                for &panel in self.active_screen.panels() {
                    debug!(%panel, "manual refresh");
                    drop(self.controller.poll_now(panel));
                }
            }

            Action::Dispatch(command) => {
                let controller = self.controller.clone();
                let command = *command;
                tokio::spawn(async move {
                    // The dispatcher logs its own failures.
                    let _ = controller.dispatch(command).await;
                });
            }

            Action::Submit(request) => {
                let controller = self.controller.clone();
                let tx = self.action_tx.clone();
                let request = AuthenticatedAction::from(request.clone());
                tokio::spawn(async move {
                    let outcome = controller.submit(request).await;
                    let _ = tx.send(Action::SubmitFinished(outcome));
                });
            }

            Action::Render => {}

            // Broadcast: data and clock updates reach hidden screens too.
            Action::PanelUpdated(_) | Action::SubmitFinished(_) | Action::Tick => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("● {}", self.controller.config().url),
                Style::default().fg(theme::NEON_CYAN),
            ),
            Span::styled(
                " │ l/L light  b beep  r refresh  q quit",
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
