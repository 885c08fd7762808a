pub mod recipe;

pub use recipe::{RecipeRequest, RecipeResult};
