//! Snapshot commands: one immediate poll per panel, then print it.

use homewatch_core::{Controller, PanelId, PanelView, TickOutcome};

use crate::cli::{GlobalOpts, NodeArg, NodeArgs};
use crate::error::CliError;
use crate::output;

/// Poll `panel` once. Unlike the background schedule, a failed tick is
/// reported: a one-shot command has no previous view to fall back on.
async fn fetch(controller: &Controller, panel: PanelId) -> Result<PanelView, CliError> {
    let outcome = controller
        .poll_now(panel)
        .await
        .map_err(|e| CliError::Internal(e.to_string()))?;

    match outcome {
        TickOutcome::Rendered { .. } | TickOutcome::Superseded { .. } => {
            Ok(controller.snapshot(panel))
        }
        TickOutcome::Failed { error, .. } => Err(error.into()),
    }
}

fn print(view: &PanelView, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_panel(&global.output, view, color);
    output::print_output(&out, global.quiet);
}

pub async fn status(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let view = fetch(controller, PanelId::AlarmState).await?;
    print(&view, global);
    Ok(())
}

pub async fn node(
    controller: &Controller,
    args: &NodeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let panel = match args.node {
        NodeArg::Entry => PanelId::Entry,
        NodeArg::Kitchen => PanelId::Kitchen,
        NodeArg::Bedroom => PanelId::Bedroom,
    };
    let view = fetch(controller, panel).await?;
    print(&view, global);
    Ok(())
}

pub async fn series(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let view = fetch(controller, PanelId::PeopleSeries).await?;
    print(&view, global);
    Ok(())
}

pub async fn events(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let view = fetch(controller, PanelId::AlarmEvents).await?;
    print(&view, global);
    Ok(())
}
