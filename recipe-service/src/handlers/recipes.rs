use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde_json::Value;
use service_core::error::AppError;
use service_core::observability::extract_request_id;
use validator::Validate;

use crate::models::RecipeRequest;
use crate::startup::AppState;

/// `POST /generate-recipe`: validate, generate, relay the parsed recipe.
#[tracing::instrument(skip_all, fields(request_id))]
pub async fn generate_recipe(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    if let Some(request_id) = extract_request_id(&headers) {
        tracing::Span::current().record("request_id", request_id.as_str());
    }

    let request = match payload {
        Ok(Json(request)) => request,
        // Bodies sent without a JSON content type count as empty.
        Err(JsonRejection::MissingJsonContentType(_)) => RecipeRequest::default(),
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected recipe request body");
            return Err(AppError::BadRequest(anyhow::anyhow!(rejection.body_text())));
        }
    };

    if let Err(errors) = request.validate() {
        tracing::warn!(error = %errors, "Invalid recipe request");
        return Err(errors.into());
    }

    let ingredients = request.ingredients.unwrap_or_default();
    tracing::info!(ingredients = %ingredients, "Generating recipe");

    match state.generator.generate(&ingredients).await {
        Ok(recipe) => Ok(Json(recipe)),
        Err(e) => {
            tracing::error!(error = %e, error_kind = e.kind(), "Recipe generation failed");
            Err(e.into())
        }
    }
}
