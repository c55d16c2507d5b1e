//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod actions;
pub mod config_cmd;
pub mod control;
pub mod read;

use homewatch_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => read::status(controller, global).await,
        Command::Node(args) => read::node(controller, &args, global).await,
        Command::Series(_) => read::series(controller, global).await,
        Command::Events => read::events(controller, global).await,
        Command::Arm(args) => actions::arm(controller, args, global).await,
        Command::Disarm(args) => actions::disarm(controller, args, global).await,
        Command::Deactivate(args) => actions::deactivate(controller, args, global).await,
        Command::Message(args) => actions::message(controller, args, global).await,
        Command::TimerConfig(args) => actions::timer_config(controller, args, global).await,
        Command::Light(args) => control::light(controller, &args, global).await,
        Command::Buzzer(args) => control::buzzer(controller, &args, global).await,
        Command::Color(args) => control::color(controller, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
