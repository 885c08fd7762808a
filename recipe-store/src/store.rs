//! MongoDB access for recipe documents.

use crate::config::ServiceAccount;
use crate::error::StoreError;
use mongodb::{
    bson::{Bson, Document},
    options::{ClientOptions, ReplaceOptions},
    Client, Collection, Database,
};
use secrecy::ExposeSecret;

/// Collection holding every published recipe.
pub const RECIPES_COLLECTION: &str = "recipes";

/// Collection holding recipes promoted to the featured list.
pub const FEATURED_COLLECTION: &str = "featured_recipes";

/// Handle on the recipe database. Call [`RecipeStore::close`] when done.
pub struct RecipeStore {
    client: Client,
    db: Database,
}

impl RecipeStore {
    pub async fn connect(account: &ServiceAccount) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(account.uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                StoreError::from(e)
            })?;
        client_options.app_name = Some(
            account
                .app_name
                .clone()
                .unwrap_or_else(|| "recipe-store".to_string()),
        );

        let client = Client::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            StoreError::from(e)
        })?;
        let db = client.database(&account.database);
        tracing::info!(database = %account.database, "Connected to MongoDB");

        Ok(Self { client, db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn recipes(&self) -> Collection<Document> {
        self.db.collection(RECIPES_COLLECTION)
    }

    fn featured(&self) -> Collection<Document> {
        self.db.collection(FEATURED_COLLECTION)
    }

    /// Insert `recipe` under `id`. Field names are stored as given.
    pub async fn insert_recipe(&self, id: Bson, mut recipe: Document) -> Result<(), StoreError> {
        recipe.insert("_id", id);
        self.recipes().insert_one(recipe, None).await?;
        Ok(())
    }

    /// Fetch a recipe matching `filter`, usually an `_id` filter.
    pub async fn find_recipe(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.recipes().find_one(filter, None).await?)
    }

    /// Write `recipe` to the featured collection, replacing any previous copy.
    pub async fn put_featured(&self, filter: Document, recipe: Document) -> Result<(), StoreError> {
        let options = ReplaceOptions::builder().upsert(true).build();
        self.featured().replace_one(filter, recipe, options).await?;
        Ok(())
    }

    /// Release the connection pool.
    pub async fn close(self) {
        self.client.shutdown().await;
        tracing::debug!("MongoDB client shut down");
    }
}
