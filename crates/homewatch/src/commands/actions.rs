//! Backend-confirmed actions: PIN-gated alarm control, timer config and
//! the LCD message.

use secrecy::SecretString;

use homewatch_core::{AuthenticatedAction, Controller, SubmitPhase};

use crate::cli::{GlobalOpts, MessageArgs, PinArgs, TimerConfigArgs};
use crate::error::CliError;
use crate::output;

/// Take the PIN from the flag/env, or prompt for it without echo.
fn read_pin(args: PinArgs) -> Result<SecretString, CliError> {
    let pin = match args.pin {
        Some(pin) => pin,
        None => rpassword::prompt_password("PIN: ")?,
    };
    Ok(SecretString::from(pin))
}

/// Submit and print the feedback line. Anything but success is an error so
/// scripts can rely on the exit code.
async fn submit(
    controller: &Controller,
    action: AuthenticatedAction,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let outcome = controller.submit(action).await;
    let message = outcome.feedback.message.clone();

    match outcome.phase {
        SubmitPhase::Succeeded => {
            let color = output::should_color(&global.color);
            output::print_output(&output::render_feedback(&outcome.feedback, color), global.quiet);
            Ok(())
        }
        SubmitPhase::TransportError => Err(CliError::ActionFailed { message }),
        SubmitPhase::Rejected => Err(CliError::Rejected { message }),
    }
}

pub async fn arm(
    controller: &Controller,
    args: PinArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pin = read_pin(args)?;
    submit(controller, AuthenticatedAction::Arm { pin }, global).await
}

pub async fn disarm(
    controller: &Controller,
    args: PinArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pin = read_pin(args)?;
    submit(controller, AuthenticatedAction::Disarm { pin }, global).await
}

pub async fn deactivate(
    controller: &Controller,
    args: PinArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pin = read_pin(args)?;
    submit(controller, AuthenticatedAction::Deactivate { pin }, global).await
}

pub async fn message(
    controller: &Controller,
    args: MessageArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = AuthenticatedAction::LcdMessage { text: args.text };
    submit(controller, action, global).await
}

pub async fn timer_config(
    controller: &Controller,
    args: TimerConfigArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = AuthenticatedAction::TimerConfig {
        initial_seconds: args.initial_seconds,
        btn_increment: args.btn_increment,
    };
    submit(controller, action, global).await
}
