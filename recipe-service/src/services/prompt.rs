//! Recipe prompt template.
//!
//! The template pins the model to the caller's ingredients, prescribes the
//! exact JSON object it must answer with and forbids any surrounding prose.
//! `{{INGREDIENTS}}` is replaced by the raw ingredient string.

/// Instruction template sent as the single user message.
pub const RECIPE_PROMPT_TEMPLATE: &str = r#"Generate a detailed recipe using ONLY these ingredients: {{INGREDIENTS}}

Respond ONLY with valid JSON in this exact format, no extra text before or after:
{
  "name": "Recipe Name",
  "description": "Brief one-line description",
  "ingredients": "Ingredient 1\nIngredient 2\nIngredient 3",
  "instructions": "Step 1. Description\nStep 2. Description\nStep 3. Description",
  "cookingTime": 30,
  "servings": 4,
  "category": "Main",
  "tips": "Helpful cooking tips"
}"#;

const INGREDIENTS_PLACEHOLDER: &str = "{{INGREDIENTS}}";

/// Build the prompt for `ingredients`. Deterministic for a given input.
pub fn build_recipe_prompt(ingredients: &str) -> String {
    RECIPE_PROMPT_TEMPLATE.replacen(INGREDIENTS_PLACEHOLDER, ingredients, 1)
}
