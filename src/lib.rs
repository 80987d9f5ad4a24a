//! Generate short recipes with Google Gemini from a list of ingredients,
//! a popular dish name, or a photo of a dish.
//!
//! ```no_run
//! # use recipe_lab::{GeminiConfig, RecipeRequest, Session};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::from_config(&GeminiConfig::load()?)?;
//! let request = RecipeRequest::text().ingredients("chicken, rice, yogurt").build()?;
//! let recipe = session.generate(&request).await?;
//! println!("{}", recipe.text);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod session;
pub mod stream;

pub use builder::{ImageRequestBuilder, TextRequestBuilder};
pub use config::GeminiConfig;
pub use error::{RecipeError, Result};
pub use history::RecipeHistory;
pub use model::{
    CuisineStyle, DietaryPreference, DietaryPreferences, DishSelection, ImageRequest,
    IngredientSet, MealType, RecipeFlow, RecipeRequest, RecipeResult, TextRequest,
};
pub use providers::{GeminiProvider, GenerationRequest, InlineImage, LlmProvider};
pub use session::Session;
pub use stream::{Fragment, RecipeAccumulator};

/// Generate one recipe using configuration from `recipe_lab.toml` and the environment.
///
/// Builds a fresh [`Session`] per call; keep a `Session` around to track history.
pub async fn generate_recipe(request: &RecipeRequest) -> Result<RecipeResult> {
    request.validate()?;
    let config = GeminiConfig::load()?;
    Session::from_config(&config)?.generate(request).await
}

/// Generate a recipe for a photo stored on disk.
///
/// Accepts jpg, jpeg and png files.
pub async fn generate_recipe_from_image_file(
    path: impl AsRef<std::path::Path>,
    context: Option<&str>,
) -> Result<RecipeResult> {
    let mut image = ImageRequest::from_path(path).await?;
    image.context = context.map(str::to_string);
    generate_recipe(&RecipeRequest::Image(image)).await
}
