use crate::{
    conn::{ConnectionPinger, PostgresConnectionPinger},
    env::EnvManager,
    error::CliError,
};
use clap::Parser;
use commands::Commands;
use connectors::jira::client::JiraClient;
use engine_core::{
    connectors::sink::{Sink, json::JsonLinesSink, postgres::PostgresSink},
    sync::{SyncRunner, SyncSummary},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;

#[derive(Parser)]
#[command(
    name = "jira-sync",
    version,
    about = "Syncs recently touched Jira issues into Postgres"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Records may go to stdout on a dry run, so logs stay on stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            env_file,
            dry_run,
            output,
        } => {
            let env = EnvManager::load(env_file.as_deref())?;
            let summary = run_sync(&env, dry_run, output).await?;
            info!(
                fetched = summary.fetched,
                written = summary.written,
                "Sync finished"
            );
        }
        Commands::TestConn { env_file } => {
            let env = EnvManager::load(env_file.as_deref())?;
            PostgresConnectionPinger {
                config: env.pg_config()?,
            }
            .ping()
            .await?;
        }
    }

    Ok(())
}

async fn run_sync(
    env: &EnvManager,
    dry_run: bool,
    output: Option<PathBuf>,
) -> Result<SyncSummary, CliError> {
    let settings = env.sync_settings()?;
    let client = JiraClient::new(env.jira_config()?)?;
    info!("Using Jira search endpoint {}", client.search_url());

    let sink: Box<dyn Sink> = if dry_run {
        match output {
            Some(path) => Box::new(JsonLinesSink::create(path).await?),
            None => Box::new(JsonLinesSink::stdout()),
        }
    } else {
        Box::new(PostgresSink::connect(&env.pg_config()?, &settings.table).await?)
    };

    let runner = SyncRunner::new(settings, &client);
    Ok(runner.run(sink.as_ref()).await?)
}
