use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Sync issues touched within the lookback window into Postgres
    Sync {
        #[arg(
            long,
            help = "Path to a .env file; ./.env is used when present and this is omitted"
        )]
        env_file: Option<PathBuf>,

        #[arg(
            long,
            help = "Write transformed records as JSON lines instead of upserting them"
        )]
        dry_run: bool,

        #[arg(
            long,
            requires = "dry_run",
            help = "With --dry-run, writes records to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Check that the configured Postgres database is reachable
    TestConn {
        #[arg(long, help = "Path to a .env file")]
        env_file: Option<PathBuf>,
    },
}
