use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use slot_core::Reload;
use slotctl::{Cli, StderrReporter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(cli.log_filter())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dispatcher = slotctl::dispatcher(&cli.base_url, cli.command.view_target(), StderrReporter)?;
    match slotctl::execute(&cli.command, &dispatcher).await {
        Ok(Reload::Fresh(view)) => {
            print!("{view}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Reload::Failed(err)) => {
            eprintln!("Request succeeded, but the view could not be refreshed: {err}");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
