use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::catalog::{find_dish, CUSTOM_RECIPE};
use crate::error::{RecipeError, Result};

/// Declares a fixed vocabulary enum with its display labels.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value in the vocabulary, in form order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label shown to the user and sent to the model
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = RecipeError;

            fn from_str(s: &str) -> Result<Self> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.label().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| RecipeError::UnknownTag {
                        kind: $kind,
                        value: needle.to_string(),
                    })
            }
        }
    };
}

vocabulary! {
    /// Dietary preference tag
    DietaryPreference, "dietary preference" {
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        Keto => "Keto",
        LowCarb => "Low-Carb",
        DeepFry => "Deep Fry",
        StirFry => "Stir Fry",
        LightMeal => "Light Meal",
        HighProtein => "High-Protein",
        SpiceLover => "Spice Lover",
        Sweet => "Sweet",
        None => "None",
    }
}

vocabulary! {
    /// Cuisine style requested for a free-form recipe
    CuisineStyle, "cuisine style" {
        Any => "Any",
        Pakistani => "Pakistani",
        Indian => "Indian",
        Mughlai => "Mughlai",
        Punjabi => "Punjabi",
        Hyderabadi => "Hyderabadi",
        Kashmiri => "Kashmiri",
        Chinese => "Chinese",
        Italian => "Italian",
        Mexican => "Mexican",
        Japanese => "Japanese",
        Thai => "Thai",
        French => "French",
        Mediterranean => "Mediterranean",
        American => "American",
        Korean => "Korean",
    }
}

vocabulary! {
    /// Meal type requested for a free-form recipe
    MealType, "meal type" {
        Any => "Any",
        Breakfast => "Breakfast",
        Lunch => "Lunch",
        Dinner => "Dinner",
        Snack => "Snack",
        Dessert => "Dessert",
        Appetizer => "Appetizer",
        StreetFood => "Street Food",
        Bbq => "BBQ",
    }
}

impl Default for CuisineStyle {
    fn default() -> Self {
        CuisineStyle::Any
    }
}

impl Default for MealType {
    fn default() -> Self {
        MealType::Any
    }
}

/// Ordered list of trimmed, non-empty ingredient names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSet(Vec<String>);

impl IngredientSet {
    /// Parse free text where ingredients are separated by commas or newlines
    pub fn parse(input: &str) -> Self {
        input.split([',', '\n']).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Ingredients joined with ", " in insertion order
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        IngredientSet(
            iter.into_iter()
                .map(|item| item.as_ref().trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        )
    }
}

/// Set of dietary tags, kept in the order they were chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryPreferences(Vec<DietaryPreference>);

impl DietaryPreferences {
    /// Add a tag unless it is already selected
    pub fn insert(&mut self, preference: DietaryPreference) {
        if !self.0.contains(&preference) {
            self.0.push(preference);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DietaryPreference> + '_ {
        self.0.iter().copied()
    }

    /// Tags joined with ", "; an empty set renders as an empty string
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(DietaryPreference::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<DietaryPreference> for DietaryPreferences {
    fn from_iter<I: IntoIterator<Item = DietaryPreference>>(iter: I) -> Self {
        let mut preferences = DietaryPreferences::default();
        for preference in iter {
            preferences.insert(preference);
        }
        preferences
    }
}

/// Either a named dish from the catalog or a custom recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DishSelection {
    /// Derive the recipe from ingredients and preferences
    #[default]
    Custom,
    /// A dish from [`crate::catalog::POPULAR_DISHES`]
    Named(&'static str),
}

impl DishSelection {
    /// The dish name, or `None` for a custom recipe
    pub fn name(&self) -> Option<&'static str> {
        match *self {
            DishSelection::Custom => None,
            DishSelection::Named(name) => Some(name),
        }
    }
}

impl FromStr for DishSelection {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(CUSTOM_RECIPE)
            || trimmed.eq_ignore_ascii_case("custom")
        {
            return Ok(DishSelection::Custom);
        }
        find_dish(trimmed)
            .map(DishSelection::Named)
            .ok_or_else(|| RecipeError::UnknownDish(trimmed.to_string()))
    }
}

impl fmt::Display for DishSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(CUSTOM_RECIPE))
    }
}

/// Recipe built from ingredients, preferences and an optional dish name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRequest {
    pub ingredients: IngredientSet,
    pub dietary: DietaryPreferences,
    pub cuisine: CuisineStyle,
    pub meal_type: MealType,
    pub dish: DishSelection,
}

/// Recipe derived from a photo of the dish
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub data: Vec<u8>,
    /// Media type sent alongside the bytes, e.g. "image/jpeg"
    pub media_type: String,
    pub context: Option<String>,
}

/// Media type used when the caller does not declare one
pub const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

impl ImageRequest {
    /// Read an image file, inferring the media type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = media_type_for_path(path)?;
        let data = tokio::fs::read(path).await?;
        debug!("Read {} bytes of {} from {}", data.len(), media_type, path.display());

        Ok(ImageRequest {
            data,
            media_type: media_type.to_string(),
            context: None,
        })
    }
}

/// Media type for the accepted image extensions (jpg, jpeg, png)
pub fn media_type_for_path(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        _ => Err(RecipeError::Validation(format!(
            "Unsupported image type: {} (expected jpg, jpeg or png)",
            path.display()
        ))),
    }
}

/// A single generation intent; exactly one shape is active
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeRequest {
    Text(TextRequest),
    Image(ImageRequest),
}

impl RecipeRequest {
    /// Check the request can be sent to the model
    pub fn validate(&self) -> Result<()> {
        match self {
            RecipeRequest::Text(request) => {
                if request.ingredients.is_empty() && request.dish == DishSelection::Custom {
                    return Err(RecipeError::Validation(
                        "Please enter ingredients OR select a popular dish".to_string(),
                    ));
                }
            }
            RecipeRequest::Image(request) => {
                if request.data.is_empty() {
                    return Err(RecipeError::Validation(
                        "Please upload an image first".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn flow(&self) -> RecipeFlow {
        match self {
            RecipeRequest::Text(_) => RecipeFlow::Text,
            RecipeRequest::Image(_) => RecipeFlow::Image,
        }
    }
}

/// Which form produced a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFlow {
    Text,
    Image,
}

impl RecipeFlow {
    /// Title used when the model returned no usable first line
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            RecipeFlow::Text => "Generated Recipe",
            RecipeFlow::Image => "Image-based Recipe",
        }
    }

    /// File name offered when saving the recipe
    pub fn download_file_name(&self) -> &'static str {
        match self {
            RecipeFlow::Text => "my_recipe.txt",
            RecipeFlow::Image => "image_recipe.txt",
        }
    }
}

/// The assembled recipe text returned by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeResult {
    pub text: String,
    pub flow: RecipeFlow,
}

impl RecipeResult {
    pub fn new(text: String, flow: RecipeFlow) -> Self {
        RecipeResult { text, flow }
    }

    /// First line of the recipe, or the flow's placeholder when there is none
    pub fn title(&self) -> String {
        let first_line = self.text.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            self.flow.placeholder_title().to_string()
        } else {
            first_line.to_string()
        }
    }

    pub fn download_file_name(&self) -> &'static str {
        self.flow.download_file_name()
    }

    /// Write the recipe text into `dir` under its download file name
    pub async fn save_in(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.download_file_name());
        tokio::fs::write(&path, &self.text).await?;
        debug!("Saved recipe to {}", path.display());
        Ok(path)
    }
}
