use crate::check::{run_check, run_symptom_listing, CheckArgs, SymptomsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use healthinfo::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "HealthInfo API",
    about = "Serve the HealthInfo symptom checker or query it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a set of symptoms and print the ranked conditions
    Check(CheckArgs),
    /// List the symptoms known to the knowledge base
    Symptoms(SymptomsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load the symptom table from this CSV instead of SYMPTOM_KB_PATH
    #[arg(long)]
    pub(crate) knowledge_base: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Symptoms(args) => run_symptom_listing(args),
    }
}
