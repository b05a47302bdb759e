//! Entry point shared by the binary: global flags, config, logging, then
//! the subcommand handler.

use std::io::IsTerminal;

use miette::Report;
use tracing::debug;

use super::command::{Cli, ColorChoice, Commands, ConfigCommand, HedgeCommand};
use super::output::{self, OutputConfig};
use super::{config, diagnostic, hedge, monitor, paths, positions, prematch, scan, stats};
use crate::infrastructure::config::settings::Config;

fn apply_color(choice: &ColorChoice) {
    let enabled = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
    };
    owo_colors::set_override(enabled);
}

/// `-v` raises the configured level; `RUST_LOG` still wins.
fn log_level(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns a rendered diagnostic for config, snapshot and hedge failures.
pub async fn run(cli: Cli) -> Result<(), Report> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    apply_color(&cli.color);

    let config_path = paths::config_path(cli.config.as_deref());

    // `config init` must work even when the existing file is broken.
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        return config::execute_init(&config_path, args.force).map_err(diagnostic::report);
    }

    let mut config: Config = paths::load_config(cli.config.as_deref())?;
    config.logging.level = log_level(&config.logging.level, output::verbosity());
    config.init_logging();
    debug!(path = %config_path.display(), "configuration loaded");

    let result = match &cli.command {
        Commands::Scan(args) => scan::execute_scan(&config, args),
        Commands::Closed(arg) => scan::execute_closed(&config, arg),
        Commands::Prematch(args) => prematch::execute(&config, args),
        Commands::Positions(arg) => positions::execute_active(&config, arg),
        Commands::History(args) => positions::execute_history(&config, args),
        Commands::Stats(arg) => stats::execute(&config, arg),
        Commands::Hedge(HedgeCommand::Recommend(args)) => hedge::execute_recommend(&config, args),
        Commands::Hedge(HedgeCommand::Plan(args)) => hedge::execute_plan(&config, args),
        Commands::Monitor(arg) => monitor::execute(&config, arg).await,
        Commands::Config(ConfigCommand::Show) => config::execute_show(&config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&config_path, &config),
        Commands::Config(ConfigCommand::Init(_)) => Ok(()),
    };
    result.map_err(diagnostic::report)
}
