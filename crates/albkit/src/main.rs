mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use albkit_api::AviClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

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
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Commands that never touch a controller
        Command::Kinds(ref args) => commands::kinds::handle(args, &cli.global),
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "albkit", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            if let Some(kind) = cmd.kind() {
                commands::util::resolve_kind(kind)?;
            }
            let cfg = config::load_config_or_default();
            config::apply_output_default(&mut cli.global, &cfg);
            let session_config = config::resolve_session_config(&cli.global, &cfg)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let client = AviClient::connect(session_config).await?;
            commands::dispatch(cmd, &client, &cli.global).await
        }
    }
}
