//! Prompt templates sent to the model.
//!
//! Every template asks for the same short recipe layout (name, time,
//! servings, ingredients, at most 5-6 steps and one tip) and caps the
//! answer at 300 words. Building a prompt never touches the network.

use crate::model::{ImageRequest, RecipeRequest, TextRequest};

/// Used in place of the ingredient list when a named dish has none
pub const STANDARD_INGREDIENTS: &str = "Use standard ingredients";

/// Used in place of the image context when the user gave none
pub const NO_CONTEXT: &str = "None provided";

/// Build the prompt for a request. Image bytes travel separately.
pub fn build_prompt(request: &RecipeRequest) -> String {
    match request {
        RecipeRequest::Text(text) => build_text_prompt(text),
        RecipeRequest::Image(image) => build_image_prompt(image),
    }
}

/// Named-dish template when a dish is selected, free-form template otherwise
pub fn build_text_prompt(request: &TextRequest) -> String {
    match request.dish.name() {
        Some(dish) => named_dish_prompt(dish, request),
        None => free_form_prompt(request),
    }
}

fn named_dish_prompt(dish: &str, request: &TextRequest) -> String {
    let ingredients = if request.ingredients.is_empty() {
        STANDARD_INGREDIENTS.to_string()
    } else {
        request.ingredients.joined()
    };

    format!(
        "Create a CONCISE recipe for *{dish}*.

*Additional Ingredients Available:* {ingredients}
*Dietary Preferences:* {dietary}

Please provide a SHORT and CONCISE recipe with:
1. Recipe Name: {dish}
2. Time: Prep + Cook (one line)
3. Servings
4. Ingredients: List with measurements (keep brief)
5. Instructions: Maximum 5-6 clear steps only
6. One quick tip

IMPORTANT: Keep the response under 300 words. Be brief and to the point!",
        dietary = request.dietary.render(),
    )
}

fn free_form_prompt(request: &TextRequest) -> String {
    format!(
        "Create a CONCISE recipe based on these specifications:

*Ingredients Available:* {ingredients}
*Dietary Preferences:* {dietary}
*Cuisine Style:* {cuisine}
*Meal Type:* {meal_type}

Please provide a SHORT and CONCISE recipe with:
1. Recipe Name
2. Time: Prep + Cook (one line)
3. Servings
4. Ingredients: List with measurements (keep brief)
5. Instructions: Maximum 5-6 clear steps only
6. One quick tip

IMPORTANT: Keep the response under 300 words. Be brief and to the point!",
        ingredients = request.ingredients.joined(),
        dietary = request.dietary.render(),
        cuisine = request.cuisine,
        meal_type = request.meal_type,
    )
}

/// Image template; the context falls back to [`NO_CONTEXT`]
pub fn build_image_prompt(request: &ImageRequest) -> String {
    let context = request
        .context
        .as_deref()
        .map(str::trim)
        .filter(|context| !context.is_empty())
        .unwrap_or(NO_CONTEXT);

    format!(
        "Analyze this food image and create a SHORT recipe.

Additional Context: {context}

Please provide a CONCISE recipe with:
1. Dish name
2. Time: Prep + Cook (one line)
3. Servings
4. Ingredients: Brief list with measurements
5. Instructions: Maximum 5-6 steps only
6. One quick tip

IMPORTANT: Keep response under 300 words. Be brief!"
    )
}
