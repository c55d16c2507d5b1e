//! Config subcommand handlers.

use homewatch_config::{Config, config_path, save_config_to};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load()?;
            let rendered = match global.output {
                OutputFormat::Json => output::render_json_pretty(&cfg),
                OutputFormat::JsonCompact => output::render_json_compact(&cfg),
                OutputFormat::Yaml => output::render_yaml(&cfg),
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg)?
                }
            };
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            if let Some(ref url) = global.url {
                cfg.backend.url.clone_from(url);
            }
            // Reject a bad URL before writing it anywhere.
            cfg.to_client_config(None)?;

            save_config_to(&cfg, &path)?;
            output::print_output(&format!("Wrote {}", path.display()), global.quiet);
            Ok(())
        }
    }
}
