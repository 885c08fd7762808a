//! recipe-store: document-store tooling for SavorAI recipes.
//!
//! Backs the `seed-recipes` and `copy-to-featured` command-line tools.

pub mod cli;
pub mod config;
pub mod error;
pub mod featured;
pub mod seed;
pub mod store;

pub use cli::{run_copy, run_seed, SeedOutcome, ToolError};
pub use config::ServiceAccount;
pub use error::StoreError;
pub use featured::{copy_to_featured, CopyReport, RecipeId};
pub use seed::{load_seeds, prepare_recipe, seed_recipes, SeedError};
pub use store::RecipeStore;

/// Log to stderr with `RUST_LOG` filtering, defaulting to `info`.
pub fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
