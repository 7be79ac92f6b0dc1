mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nursery_qa::env::{DEFAULT_PRETEST_IDS_PATH, Role};
use nursery_qa::fixtures::PretestStore;

#[derive(Parser)]
#[command(
    name = "nqa",
    version,
    about = "Lifecycle tooling for the nursery QA harness"
)]
struct Cli {
    /// Path to the pretest record (default: tests/testdata/pretest-ids.json)
    #[arg(long, env = "PRETEST_IDS_PATH", global = true)]
    pretest_file: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the pretest entity chain, or confirm the stored one
    Seed {
        /// Directory holding category.json and plants.json seed data
        #[arg(long)]
        testdata: Option<PathBuf>,
    },
    /// Inspect or drop the stored pretest record
    Pretest {
        #[command(subcommand)]
        action: PretestAction,
    },
    /// Truncate the nursery tables (sales, inventory, plants, categories)
    ResetDb {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Probe the application's health endpoint
    Health,
    /// Log in with the configured credentials and show the granted role
    Login {
        /// Role to log in as (admin, user)
        #[arg(value_parser = Role::from_str)]
        role: Role,
    },
}

#[derive(Subcommand)]
enum PretestAction {
    /// Print the stored ids
    Show,
    /// Delete the record file
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    nursery_qa::logging::init();

    let store = PretestStore::new(
        cli.pretest_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRETEST_IDS_PATH)),
    );

    let result = match cli.command {
        Commands::Seed { testdata } => {
            commands::seed::run(&store, testdata.as_deref(), cli.json).await
        }
        Commands::Pretest { action } => match action {
            PretestAction::Show => commands::pretest::show(&store, cli.json),
            PretestAction::Clear => commands::pretest::clear(&store, cli.json),
        },
        Commands::ResetDb { yes } => commands::reset_db::run(&store, yes, cli.json).await,
        Commands::Health => match commands::health::run(cli.json).await {
            Ok(false) => std::process::exit(1),
            other => other.map(|_| ()),
        },
        Commands::Login { role } => commands::login::run(role, cli.json).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
