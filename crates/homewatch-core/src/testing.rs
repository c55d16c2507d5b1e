// Scripted in-memory backend for poller, dispatcher and submitter tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::backend::{Backend, Feed};
use crate::error::CoreError;
use crate::model::{Command, SubmitRequest};

struct Step {
    delay: Duration,
    result: Result<Value, CoreError>,
}

pub(crate) struct FakeBackend {
    fallback: Value,
    fetch_script: Mutex<VecDeque<Step>>,
    submit_script: Mutex<VecDeque<Step>>,
    command_error: Mutex<Option<CoreError>>,
    fetches: Mutex<Vec<Feed>>,
    commands: Mutex<Vec<Command>>,
    submits: Mutex<Vec<String>>,
}

impl FakeBackend {
    /// Every unscripted fetch answers `fallback` immediately.
    pub(crate) fn new(fallback: Value) -> Self {
        Self {
            fallback,
            fetch_script: Mutex::new(VecDeque::new()),
            submit_script: Mutex::new(VecDeque::new()),
            command_error: Mutex::new(None),
            fetches: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
            submits: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn script_fetch(&self, delay_ms: u64, result: Result<Value, CoreError>) {
        self.fetch_script.lock().unwrap().push_back(Step {
            delay: Duration::from_millis(delay_ms),
            result,
        });
    }

    pub(crate) fn script_submit(&self, result: Result<Value, CoreError>) {
        self.submit_script.lock().unwrap().push_back(Step {
            delay: Duration::ZERO,
            result,
        });
    }

    pub(crate) fn fail_commands(&self, err: CoreError) {
        *self.command_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn fetches(&self) -> Vec<Feed> {
        self.fetches.lock().unwrap().clone()
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    /// One line per submitted request, e.g. `arm 1234 true`.
    pub(crate) fn submits(&self) -> Vec<String> {
        self.submits.lock().unwrap().clone()
    }
}

pub(crate) fn transport_error() -> CoreError {
    CoreError::Transport {
        message: "connection refused".into(),
        status: None,
    }
}

impl Backend for FakeBackend {
    async fn fetch(&self, feed: &Feed) -> Result<Value, CoreError> {
        self.fetches.lock().unwrap().push(feed.clone());
        let step = self.fetch_script.lock().unwrap().pop_front();
        match step {
            Some(Step { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(self.fallback.clone()),
        }
    }

    async fn send_command(&self, command: Command) -> Result<(), CoreError> {
        self.commands.lock().unwrap().push(command);
        let err = self.command_error.lock().unwrap().clone();
        err.map_or(Ok(()), Err)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<Value, CoreError> {
        let line = match request {
            SubmitRequest::Deactivate { pin } => format!("deactivate {}", pin.expose_secret()),
            SubmitRequest::SetArmed { pin, armed } => {
                format!("arm {} {armed}", pin.expose_secret())
            }
            SubmitRequest::TimerConfig {
                initial_seconds,
                btn_increment,
            } => format!("timer {initial_seconds} {btn_increment}"),
            SubmitRequest::LcdMessage { text } => format!("lcd {text}"),
        };
        self.submits.lock().unwrap().push(line);
        let step = self.submit_script.lock().unwrap().pop_front();
        match step {
            Some(Step { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(serde_json::json!({ "success": true })),
        }
    }
}
