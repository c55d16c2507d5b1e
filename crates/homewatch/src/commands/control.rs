//! Fire-and-forget actuator commands.

use homewatch_core::{BuzzerAction, Command, Controller, DispatchOutcome, LedColor, Switch};

use crate::cli::{BuzzerArg, BuzzerArgs, ColorArg, ColorArgs, GlobalOpts, LightArgs, SwitchArg};
use crate::error::CliError;
use crate::output;

async fn send(
    controller: &Controller,
    command: Command,
    done: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match controller.dispatch(command).await {
        DispatchOutcome::Sent => {
            output::print_output(done, global.quiet);
            Ok(())
        }
        DispatchOutcome::Failed(err) => Err(err.into()),
    }
}

pub async fn light(
    controller: &Controller,
    args: &LightArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let switch = match args.state {
        SwitchArg::On => Switch::On,
        SwitchArg::Off => Switch::Off,
    };
    let done = format!("Light {switch}.");
    send(controller, Command::Light(switch), &done, global).await
}

pub async fn buzzer(
    controller: &Controller,
    args: &BuzzerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = match args.action {
        BuzzerArg::On => BuzzerAction::On,
        BuzzerArg::Off => BuzzerAction::Off,
        BuzzerArg::Beep => BuzzerAction::Beep,
    };
    let done = format!("Buzzer {action}.");
    let command = Command::Buzzer {
        action,
        times: args.times,
        duration: args.duration,
    };
    send(controller, command, &done, global).await
}

pub async fn color(
    controller: &Controller,
    args: &ColorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = led_color(args.color);
    let done = format!("LED set to {color}.");
    send(controller, Command::SetColor(color), &done, global).await
}

fn led_color(arg: ColorArg) -> LedColor {
    match arg {
        ColorArg::Red => LedColor::Red,
        ColorArg::Green => LedColor::Green,
        ColorArg::Blue => LedColor::Blue,
        ColorArg::Yellow => LedColor::Yellow,
        ColorArg::Purple => LedColor::Purple,
        ColorArg::Lightblue => LedColor::Lightblue,
        ColorArg::White => LedColor::White,
        ColorArg::Off => LedColor::Off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_color_argument_maps_to_the_backend_name() {
        use clap::ValueEnum;

        for arg in ColorArg::value_variants() {
            let name = arg.to_possible_value().map(|v| v.get_name().to_uppercase());
            assert_eq!(name, Some(led_color(*arg).to_string()));
        }
    }
}
