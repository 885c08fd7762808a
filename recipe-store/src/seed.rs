//! Loading seed recipes from JSON and inserting them into `recipes`.

use crate::error::StoreError;
use crate::store::RecipeStore;
use mongodb::bson::{self, oid::ObjectId, Bson, DateTime, Document};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Seed file used when none is given.
pub const DEFAULT_SEED_PATH: &str = "seeds/recipes_seed.json";

/// A seeding run that stopped part way.
#[derive(Debug, Error)]
#[error("{source} ({written} of {total} recipes written)")]
pub struct SeedError {
    pub written: usize,
    pub total: usize,
    #[source]
    pub source: StoreError,
}

/// Read the seed file: a JSON array of recipe objects.
pub fn load_seeds(path: &Path) -> Result<Vec<Document>, StoreError> {
    if !path.exists() {
        return Err(StoreError::MissingSeedFile(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    parse_seeds(&raw)
}

/// Parse seed JSON. Every element must be an object.
pub fn parse_seeds(raw: &str) -> Result<Vec<Document>, StoreError> {
    let data: Value = serde_json::from_str(raw).map_err(StoreError::InvalidSeedJson)?;

    let Value::Array(items) = data else {
        return Err(StoreError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => bson::to_document(&map).map_err(|e| StoreError::InvalidRecipe {
                index,
                reason: e.to_string(),
            }),
            _ => Err(StoreError::NotAnObject { index }),
        })
        .collect()
}

/// Apply seeding defaults: `likes` 0, `approved` true when absent or null.
///
/// Any `_id` in the seed is dropped in favour of a fresh one, and `createdAt`
/// is set to `created_at`. Other keys are kept verbatim, dotted or `$`-prefixed
/// names included.
pub fn prepare_recipe(mut recipe: Document, created_at: DateTime) -> Document {
    recipe.remove("_id");
    recipe.insert("createdAt", created_at);

    if matches!(recipe.get("likes"), None | Some(Bson::Null)) {
        recipe.insert("likes", 0_i32);
    }
    if matches!(recipe.get("approved"), None | Some(Bson::Null)) {
        recipe.insert("approved", true);
    }

    recipe
}

/// Insert every recipe with a fresh id, one at a time. Returns the count.
///
/// The whole run shares one `createdAt`, like a single batched commit.
pub async fn seed_recipes(store: &RecipeStore, recipes: Vec<Document>) -> Result<usize, SeedError> {
    let total = recipes.len();
    let created_at = DateTime::now();

    for (written, recipe) in recipes.into_iter().enumerate() {
        let id = ObjectId::new();
        let name = recipe.get_str("name").unwrap_or("<unnamed>").to_string();

        store
            .insert_recipe(Bson::ObjectId(id), prepare_recipe(recipe, created_at))
            .await
            .map_err(|source| SeedError {
                written,
                total,
                source,
            })?;

        tracing::debug!(id = %id, name = %name, "Seeded recipe");
    }

    Ok(total)
}
