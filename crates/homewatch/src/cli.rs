//! Clap derive structures for the `homewatch` CLI.
//!
//! Also compiled by `build.rs` for man pages, so this file may depend on
//! clap and clap_complete only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// homewatch -- live status and control for a home-monitoring server
#[derive(Debug, Parser)]
#[command(
    name = "homewatch",
    version,
    about = "Check and control a homewatch monitoring server",
    long_about = "Read alarm state, sensor readings and event history from a homewatch\n\
        server, and send actuator commands or PIN-confirmed alarm actions.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server URL (overrides backend.url from the config file)
    #[arg(long, short = 'u', env = "HOMEWATCH_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOMEWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HOMEWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides backend.timeout_secs)
    #[arg(long, env = "HOMEWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show alarm state and people count
    #[command(alias = "st")]
    Status,

    /// Show the sensor readings of one node
    #[command(alias = "n")]
    Node(NodeArgs),

    /// Show the recent people-count series
    Series(SeriesArgs),

    /// Show recent alarm events, newest first
    #[command(alias = "ev")]
    Events,

    /// Arm the alarm system
    Arm(PinArgs),

    /// Disarm the alarm system
    Disarm(PinArgs),

    /// Silence an active alarm
    Deactivate(PinArgs),

    /// Switch the door light
    Light(LightArgs),

    /// Drive the door buzzer
    Buzzer(BuzzerArgs),

    /// Set the bedroom RGB LED color
    Color(ColorArgs),

    /// Show a message on the bedroom LCD
    #[command(alias = "lcd")]
    Message(MessageArgs),

    /// Configure the kitchen countdown timer
    TimerConfig(TimerConfigArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Reads ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Which node to read
    pub node: NodeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NodeArg {
    Entry,
    Kitchen,
    Bedroom,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Time window to query, e.g. 1m, 10m, 1h
    #[arg(long, short = 'w')]
    pub window: Option<String>,
}

// ── Actions ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PinArgs {
    /// Alarm PIN (prompted for when omitted)
    #[arg(long, env = "HOMEWATCH_PIN", hide_env_values = true)]
    pub pin: Option<String>,
}

#[derive(Debug, Args)]
pub struct LightArgs {
    pub state: SwitchArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SwitchArg {
    On,
    Off,
}

#[derive(Debug, Args)]
pub struct BuzzerArgs {
    pub action: BuzzerArg,

    /// Number of beeps
    #[arg(long, default_value_t = 1)]
    pub times: u32,

    /// Length of each beep in seconds
    #[arg(long, default_value_t = 0.2)]
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BuzzerArg {
    On,
    Off,
    Beep,
}

#[derive(Debug, Args)]
pub struct ColorArgs {
    #[arg(ignore_case = true)]
    pub color: ColorArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorArg {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Lightblue,
    White,
    Off,
}

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Text to display
    pub text: String,
}

#[derive(Debug, Args)]
pub struct TimerConfigArgs {
    /// Countdown start value in seconds
    pub initial_seconds: String,

    /// Seconds added per button press
    pub btn_increment: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values (and --url, if given)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
