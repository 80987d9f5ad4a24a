use crate::error::Result;
use crate::model::{
    CuisineStyle, DietaryPreference, DietaryPreferences, DishSelection, ImageRequest,
    IngredientSet, MealType, RecipeRequest, TextRequest, DEFAULT_IMAGE_MEDIA_TYPE,
};

impl RecipeRequest {
    /// Start building a request from ingredients and preferences
    ///
    /// # Example
    /// ```
    /// use recipe_lab::{CuisineStyle, RecipeRequest};
    ///
    /// let request = RecipeRequest::text()
    ///     .ingredients("chicken breast, tomatoes\ngarlic")
    ///     .cuisine(CuisineStyle::Italian)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn text() -> TextRequestBuilder {
        TextRequestBuilder::default()
    }

    /// Start building a request from a photo of a dish
    ///
    /// # Example
    /// ```
    /// use recipe_lab::RecipeRequest;
    ///
    /// let request = RecipeRequest::image(vec![0xff, 0xd8, 0xff])
    ///     .context("This is a Dubai chocolate bar, make it extra creamy")
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn image(data: impl Into<Vec<u8>>) -> ImageRequestBuilder {
        ImageRequestBuilder {
            request: ImageRequest {
                data: data.into(),
                media_type: DEFAULT_IMAGE_MEDIA_TYPE.to_string(),
                context: None,
            },
        }
    }
}

/// Builder for text-based recipe requests
#[derive(Debug, Default)]
pub struct TextRequestBuilder {
    ingredients: Vec<String>,
    dietary: DietaryPreferences,
    cuisine: CuisineStyle,
    meal_type: MealType,
    dish: DishSelection,
}

impl TextRequestBuilder {
    /// Add ingredients from free text separated by commas or newlines
    pub fn ingredients(mut self, input: &str) -> Self {
        self.ingredients
            .extend(IngredientSet::parse(input).iter().map(str::to_string));
        self
    }

    /// Add a single ingredient
    pub fn ingredient(mut self, name: impl Into<String>) -> Self {
        self.ingredients.push(name.into());
        self
    }

    pub fn dietary(mut self, preference: DietaryPreference) -> Self {
        self.dietary.insert(preference);
        self
    }

    pub fn cuisine(mut self, cuisine: CuisineStyle) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = meal_type;
        self
    }

    /// Request a named dish; [`DishSelection::Custom`] clears it
    pub fn dish(mut self, dish: DishSelection) -> Self {
        self.dish = dish;
        self
    }

    /// Build the request, rejecting it when neither ingredients nor a dish are set
    pub fn build(self) -> Result<RecipeRequest> {
        let request = RecipeRequest::Text(TextRequest {
            ingredients: self.ingredients.into_iter().collect(),
            dietary: self.dietary,
            cuisine: self.cuisine,
            meal_type: self.meal_type,
            dish: self.dish,
        });
        request.validate()?;
        Ok(request)
    }
}

/// Builder for image-based recipe requests
#[derive(Debug)]
pub struct ImageRequestBuilder {
    request: ImageRequest,
}

impl ImageRequestBuilder {
    /// Declare the image media type (defaults to "image/jpeg")
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.request.media_type = media_type.into();
        self
    }

    /// Free-text hints about the dish in the photo
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.request.context = Some(context.into());
        self
    }

    /// Build the request, rejecting empty image data
    pub fn build(self) -> Result<RecipeRequest> {
        let request = RecipeRequest::Image(self.request);
        request.validate()?;
        Ok(request)
    }
}

impl From<ImageRequest> for ImageRequestBuilder {
    fn from(request: ImageRequest) -> Self {
        ImageRequestBuilder { request }
    }
}
