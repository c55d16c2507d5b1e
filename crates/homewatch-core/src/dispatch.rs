// ── Command dispatcher ──
//
// Fire-and-forget actuator control. Nothing is validated locally beyond
// the types, nothing is updated optimistically, and failures are logged
// rather than shown to the user.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::CoreError;
use crate::model::Command;

#[derive(Debug)]
pub enum DispatchOutcome {
    Sent,
    Failed(CoreError),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

pub struct CommandDispatcher<B> {
    backend: Arc<B>,
}

impl<B: Backend> CommandDispatcher<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Send one command and wait for the transport to finish.
    pub async fn dispatch(&self, command: Command) -> DispatchOutcome {
        debug!(command = command.name(), ?command, "dispatching");
        match self.backend.send_command(command).await {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) => {
                warn!(command = command.name(), error = %e, "command failed");
                DispatchOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{BuzzerAction, LedColor, Switch};
    use crate::testing::{FakeBackend, transport_error};
    use serde_json::json;

    #[tokio::test]
    async fn sends_exactly_the_given_command() {
        let backend = Arc::new(FakeBackend::new(json!({})));
        let dispatcher = CommandDispatcher::new(Arc::clone(&backend));

        let buzz = Command::Buzzer {
            action: BuzzerAction::Beep,
            times: 3,
            duration: 0.5,
        };
        assert!(dispatcher.dispatch(buzz).await.is_sent());
        assert!(
            dispatcher
                .dispatch(Command::SetColor(LedColor::Purple))
                .await
                .is_sent()
        );

        assert_eq!(
            backend.commands(),
            vec![buzz, Command::SetColor(LedColor::Purple)]
        );
        assert!(backend.fetches().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_returned_not_raised() {
        let backend = Arc::new(FakeBackend::new(json!({})));
        backend.fail_commands(transport_error());
        let dispatcher = CommandDispatcher::new(Arc::clone(&backend));

        let outcome = dispatcher.dispatch(Command::Light(Switch::On)).await;
        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(CoreError::Transport { .. })
        ));
    }
}
