//! Copying recipes into the featured collection.

use crate::error::StoreError;
use crate::store::RecipeStore;
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::fmt;

/// A recipe id as typed on the command line.
///
/// Seeded recipes carry ObjectIds; ids imported from elsewhere may be plain
/// strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeId {
    ObjectId(ObjectId),
    Key(String),
}

impl RecipeId {
    pub fn parse(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(oid) => RecipeId::ObjectId(oid),
            Err(_) => RecipeId::Key(raw.to_string()),
        }
    }

    /// `_id` filter selecting this recipe.
    pub fn filter(&self) -> Document {
        match self {
            RecipeId::ObjectId(oid) => doc! { "_id": *oid },
            RecipeId::Key(key) => doc! { "_id": key.as_str() },
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            RecipeId::Key(key) => f.write_str(key),
        }
    }
}

/// Result of a copy run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: Vec<String>,
}

impl CopyReport {
    pub fn has_missing(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Copy each recipe, keeping its id, from `recipes` to `featured_recipes`.
///
/// Missing recipes are skipped and reported; store failures abort the run.
pub async fn copy_to_featured(store: &RecipeStore, ids: &[String]) -> Result<CopyReport, StoreError> {
    let mut report = CopyReport::default();

    for raw in ids {
        let id = RecipeId::parse(raw);
        let filter = id.filter();

        let Some(recipe) = store.find_recipe(filter.clone()).await? else {
            tracing::warn!("Recipe {} not found in recipes collection. Skipping.", id);
            report.skipped.push(raw.clone());
            continue;
        };

        let name = recipe.get_str("name").unwrap_or("<unnamed>").to_string();
        store.put_featured(filter, recipe).await?;

        tracing::info!("Copied recipe: {} ({})", name, id);
        report.copied += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_ids_parse_as_object_ids() {
        let id = RecipeId::parse("65a1f0c2e4b0a1b2c3d4e5f6");
        assert!(matches!(id, RecipeId::ObjectId(_)));
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert!(id.filter().get_object_id("_id").is_ok());
    }

    #[test]
    fn other_ids_are_string_keys() {
        let id = RecipeId::parse("abc123");
        assert_eq!(id, RecipeId::Key("abc123".to_string()));
        assert_eq!(id.filter(), doc! { "_id": "abc123" });
    }

    #[test]
    fn report_tracks_missing_recipes() {
        let mut report = CopyReport::default();
        assert!(!report.has_missing());

        report.skipped.push("gone".to_string());
        assert!(report.has_missing());
    }
}
