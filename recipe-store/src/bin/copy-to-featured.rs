//! Copy recipes by id from `recipes` to `featured_recipes`.

use clap::Parser;
use recipe_store::config::{DEFAULT_KEY_PATH, SERVICE_ACCOUNT_KEY_ENV};
use recipe_store::{init_cli_tracing, run_copy, ToolError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Command-line arguments for the featured-recipe copier.
#[derive(Parser, Debug)]
#[command(name = "copy-to-featured")]
#[command(about = "Copy recipes from the recipes collection to featured_recipes")]
#[command(after_help = "Example: copy-to-featured abc123 def456")]
#[command(version)]
struct Args {
    /// Path to the service-account key file
    #[arg(long, env = SERVICE_ACCOUNT_KEY_ENV, default_value = DEFAULT_KEY_PATH)]
    key: PathBuf,

    /// Exit successfully even when some ids were not found
    #[arg(long)]
    allow_missing: bool,

    /// Recipe ids to copy. An empty list prints usage and exits 1.
    recipe_ids: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_cli_tracing();

    let args = Args::parse();
    match run_copy(&args.key, &args.recipe_ids, args.allow_missing).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(ToolError::NoRecipeIds) => {
            eprintln!("{}", ToolError::NoRecipeIds);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ids_is_left_to_the_tool_not_clap() {
        let args = Args::try_parse_from(["copy-to-featured", "--key", "key.json"]).unwrap();
        assert!(args.recipe_ids.is_empty());
    }

    #[test]
    fn ids_and_flags_parse() {
        let args =
            Args::try_parse_from(["copy-to-featured", "--allow-missing", "abc123", "def456"]).unwrap();
        assert!(args.allow_missing);
        assert_eq!(args.recipe_ids, vec!["abc123", "def456"]);
    }
}
