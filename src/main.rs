use anyhow::Result;
use clap::Parser;
use standup::cli::{self, Cli, CliCommand};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("standup {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Add(args)) => cli::handle_add_command(args),
        Some(CliCommand::Edit(args)) => cli::handle_edit_command(args),
        Some(CliCommand::Remove(args)) => cli::handle_remove_command(args),
        Some(CliCommand::Run(args)) => cli::handle_run_command(args).await,
        Some(CliCommand::History(args)) => cli::handle_history_command(args),
        Some(CliCommand::List) | None => cli::handle_list_command(),
    }
}
