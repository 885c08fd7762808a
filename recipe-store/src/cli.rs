//! Flows behind the `seed-recipes` and `copy-to-featured` binaries.
//!
//! Every `Err` ends the process with exit status 1 after its message is logged.

use crate::config::ServiceAccount;
use crate::error::StoreError;
use crate::featured::{copy_to_featured, CopyReport};
use crate::seed::{load_seeds, seed_recipes, SeedError};
use crate::store::RecipeStore;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const COPY_USAGE: &str = "Usage: copy-to-featured <recipeId1> <recipeId2> ...";
pub const COPY_EXAMPLE: &str = "Example: copy-to-featured abc123 def456";

#[derive(Debug, Error)]
pub enum ToolError {
    /// Bad input caught before any store access.
    #[error(transparent)]
    Input(#[from] StoreError),

    #[error("Seed failed: {0}")]
    SeedFailed(#[from] SeedError),

    #[error("Copy failed: {0}")]
    CopyFailed(#[source] StoreError),

    #[error("{}\n{}", COPY_USAGE, COPY_EXAMPLE)]
    NoRecipeIds,

    #[error("Recipes not found: {}", .0.join(", "))]
    MissingRecipes(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed file held an empty array; the store was never contacted.
    Empty,
    Seeded(usize),
}

/// Seed `recipes` from `seed_file` using the credentials at `key`.
pub async fn run_seed(key: &Path, seed_file: &Path) -> Result<SeedOutcome, ToolError> {
    let account = ServiceAccount::from_file(key)?;
    let recipes = load_seeds(seed_file)?;

    if recipes.is_empty() {
        info!("No recipes to seed.");
        return Ok(SeedOutcome::Empty);
    }

    let total = recipes.len();
    let store = RecipeStore::connect(&account)
        .await
        .map_err(|source| SeedError {
            written: 0,
            total,
            source,
        })?;
    let result = seed_recipes(&store, recipes).await;
    store.close().await;

    let seeded = result?;
    info!("Seeded {} recipes.", seeded);
    Ok(SeedOutcome::Seeded(seeded))
}

/// Copy `ids` into `featured_recipes` using the credentials at `key`.
pub async fn run_copy(key: &Path, ids: &[String], allow_missing: bool) -> Result<CopyReport, ToolError> {
    let account = ServiceAccount::from_file(key)?;
    if ids.is_empty() {
        return Err(ToolError::NoRecipeIds);
    }

    let store = RecipeStore::connect(&account)
        .await
        .map_err(ToolError::CopyFailed)?;
    let result = copy_to_featured(&store, ids).await;
    store.close().await;

    let report = result.map_err(ToolError::CopyFailed)?;
    info!(
        "Done! Copied {} recipe(s), skipped {}.",
        report.copied,
        report.skipped.len()
    );

    check_missing(&report, allow_missing)?;
    Ok(report)
}

/// Skipped ids fail the run unless `allow_missing` is set.
pub fn check_missing(report: &CopyReport, allow_missing: bool) -> Result<(), ToolError> {
    if report.has_missing() && !allow_missing {
        return Err(ToolError::MissingRecipes(report.skipped.clone()));
    }
    Ok(())
}
