//! Round trips against a live MongoDB.
//!
//! Run with: cargo test -p recipe-store -- --ignored
//! (uses TEST_MONGODB_URI, default mongodb://localhost:27017)

use mongodb::bson::{doc, Bson, Document};
use recipe_store::store::{FEATURED_COLLECTION, RECIPES_COLLECTION};
use recipe_store::{copy_to_featured, seed::parse_seeds, seed_recipes, RecipeStore, ServiceAccount};
use secrecy::Secret;

async fn connect() -> RecipeStore {
    let account = ServiceAccount {
        uri: Secret::new(
            std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        ),
        database: format!("recipe_store_test_{}", uuid::Uuid::new_v4().simple()),
        app_name: None,
    };
    RecipeStore::connect(&account)
        .await
        .expect("Failed to connect to MongoDB")
}

async fn cleanup(store: RecipeStore) {
    store
        .database()
        .drop(None)
        .await
        .expect("Failed to drop test database");
    store.close().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn seeding_applies_defaults_and_server_timestamp() {
    let store = connect().await;
    let recipes = parse_seeds(
        r#"[{"name":"Soup","likes":null,"nutrition.kcal":120},{"name":"Salad","likes":3,"approved":false}]"#,
    )
    .unwrap();

    let seeded = seed_recipes(&store, recipes).await.unwrap();
    assert_eq!(seeded, 2);

    let collection = store.database().collection::<Document>(RECIPES_COLLECTION);
    let soup = collection
        .find_one(doc! { "name": "Soup" }, None)
        .await
        .unwrap()
        .expect("Soup not seeded");
    assert_eq!(soup.get_i32("likes").unwrap(), 0);
    assert!(soup.get_bool("approved").unwrap());
    assert!(matches!(soup.get("createdAt"), Some(Bson::DateTime(_))));
    assert_eq!(soup.get_i64("nutrition.kcal").unwrap(), 120);

    let salad = collection
        .find_one(doc! { "name": "Salad" }, None)
        .await
        .unwrap()
        .expect("Salad not seeded");
    assert!(!salad.get_bool("approved").unwrap());

    cleanup(store).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB (TEST_MONGODB_URI)"]
async fn copy_keeps_ids_and_skips_missing() {
    let store = connect().await;
    let recipes = store.database().collection::<Document>(RECIPES_COLLECTION);
    recipes
        .insert_one(doc! { "_id": "abc123", "name": "Fried Rice" }, None)
        .await
        .unwrap();

    let report = copy_to_featured(&store, &["abc123".to_string(), "missing".to_string()])
        .await
        .unwrap();
    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped, vec!["missing".to_string()]);

    let featured = store
        .database()
        .collection::<Document>(FEATURED_COLLECTION)
        .find_one(doc! { "_id": "abc123" }, None)
        .await
        .unwrap()
        .expect("recipe not copied");
    assert_eq!(featured.get_str("name").unwrap(), "Fried Rice");

    // Copying again overwrites instead of failing on the duplicate id.
    let report = copy_to_featured(&store, &["abc123".to_string()]).await.unwrap();
    assert_eq!(report.copied, 1);

    cleanup(store).await;
}
