use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Body of `POST /generate-recipe`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeRequest {
    #[serde(default, deserialize_with = "falsy_as_missing")]
    #[validate(
        required(message = "Ingredients required"),
        length(min = 1, message = "Ingredients required")
    )]
    pub ingredients: Option<String>,
}

/// `null`, `false` and `0` count as no ingredients; other non-strings are rejected.
fn falsy_as_missing<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "ingredients must be a string, got {}",
            other
        ))),
    }
}

/// Recipe object the model is instructed to produce.
///
/// Used as the schema the parsed model output must satisfy; extra fields are
/// tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResult {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub cooking_time: f64,
    pub servings: f64,
    pub category: String,
    pub tips: String,
}
