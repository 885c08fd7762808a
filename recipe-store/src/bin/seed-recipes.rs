//! Seed the `recipes` collection from a JSON array file.

use clap::Parser;
use recipe_store::config::{DEFAULT_KEY_PATH, SERVICE_ACCOUNT_KEY_ENV};
use recipe_store::seed::DEFAULT_SEED_PATH;
use recipe_store::{init_cli_tracing, run_seed};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Command-line arguments for the seeder.
#[derive(Parser, Debug)]
#[command(name = "seed-recipes")]
#[command(about = "Insert recipes from a JSON file into the recipes collection")]
#[command(version)]
struct Args {
    /// Path to the service-account key file
    #[arg(long, env = SERVICE_ACCOUNT_KEY_ENV, default_value = DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// JSON array of recipe objects
    #[arg(long, default_value = DEFAULT_SEED_PATH)]
    seed_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_cli_tracing();

    let args = Args::parse();
    match run_seed(&args.key, &args.seed_file).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
