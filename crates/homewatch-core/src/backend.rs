// ── Backend seam ──
//
// Pollers, the dispatcher and the submitter talk to the backend only
// through this trait. `HomeClient` is the real implementation; tests drive
// the same code with a scripted fake.

use std::future::Future;

use homewatch_api::HomeClient;
use homewatch_api::models::TimerConfigRequest;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::error::CoreError;
use crate::model::{Command, NodeId, SubmitRequest};
use crate::panel::PanelId;

/// A GET endpoint that feeds one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    AlarmState,
    PeopleSeries { window: String },
    AlarmEvents,
    Node(NodeId),
}

impl Feed {
    pub fn for_panel(panel: PanelId, series_window: &str) -> Self {
        match panel {
            PanelId::AlarmState => Self::AlarmState,
            PanelId::PeopleSeries => Self::PeopleSeries {
                window: series_window.to_owned(),
            },
            PanelId::AlarmEvents => Self::AlarmEvents,
            PanelId::Entry => Self::Node(NodeId::Entry),
            PanelId::Kitchen => Self::Node(NodeId::Kitchen),
            PanelId::Bedroom => Self::Node(NodeId::Bedroom),
        }
    }
}

pub trait Backend: Send + Sync + 'static {
    /// Raw JSON body of a GET endpoint.
    fn fetch(&self, feed: &Feed) -> impl Future<Output = Result<Value, CoreError>> + Send;

    /// Fire an actuator command. Resolves once the backend acknowledged it.
    fn send_command(&self, command: Command) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// POST a validated action and return the raw `{success, message}` body.
    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = Result<Value, CoreError>> + Send;
}

impl Backend for HomeClient {
    async fn fetch(&self, feed: &Feed) -> Result<Value, CoreError> {
        let body = match feed {
            Feed::AlarmState => self.alarm_state().await?,
            Feed::PeopleSeries { window } => self.people_series(window).await?,
            Feed::AlarmEvents => self.alarm_events().await?,
            Feed::Node(node) => self.node_state(node.api_node()).await?,
        };
        Ok(body)
    }

    async fn send_command(&self, command: Command) -> Result<(), CoreError> {
        match command {
            Command::Light(action) => self.light(action.as_ref()).await?,
            Command::Buzzer {
                action,
                times,
                duration,
            } => self.buzzer(action.as_ref(), times, duration).await?,
            Command::SetColor(color) => self.set_rgb_color(color.as_ref()).await?,
        }
        Ok(())
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<Value, CoreError> {
        let body = match request {
            SubmitRequest::Deactivate { pin } => self.deactivate_alarm(pin.expose_secret()).await?,
            SubmitRequest::SetArmed { pin, armed } => {
                self.set_armed(pin.expose_secret(), *armed).await?
            }
            SubmitRequest::TimerConfig {
                initial_seconds,
                btn_increment,
            } => {
                self.set_timer_config(TimerConfigRequest {
                    initial_seconds: *initial_seconds,
                    btn_increment: *btn_increment,
                })
                .await?
            }
            SubmitRequest::LcdMessage { text } => self.set_lcd_message(text).await?,
        };
        Ok(body)
    }
}
