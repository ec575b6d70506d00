mod cli;
mod commands;
mod config;
mod error;
mod output;
mod spinner;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use haras_core::Farm;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;
use crate::spinner::Spinner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;
    let cfg = config::load_or_default(&global);
    config::apply_defaults(&mut global, &cfg.defaults);

    match command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "haras", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let active = config::resolve_profile(&global, &cfg)?;
            let farm_config = config::farm_config(&active, &cfg.defaults)?;
            let farm = Farm::connect(&farm_config, config::session_store(&active))?;

            let _spinner = (global.output_format() == OutputFormat::Table
                && !global.quiet
                && std::io::stderr().is_terminal())
            .then(|| Spinner::attach(farm.activity()));

            tracing::debug!(command = ?cmd, profile = %active.name, "dispatching command");
            commands::dispatch(cmd, &farm, &active, &global).await
        }
    }
}
