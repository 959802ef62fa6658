use crate::domain::recipe::entities::{NutritionPerServing, Recipe};

pub const DEFAULT_SERVINGS: u32 = 2;

/// Extras a recipe may use on top of the supplied items. Not configurable.
pub const PANTRY_STAPLES: [&str; 4] = ["oil", "salt", "pepper", "water"];

#[derive(Debug, Clone)]
pub struct GenerateRecipeInput {
    pub items: Vec<String>,
    /// Defaults to [`DEFAULT_SERVINGS`] when absent.
    pub servings: Option<u32>,
}

/// Recipe as decoded from the provider, before the serving count is settled.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub servings: Option<u32>,
    pub nutrition_per_serving: NutritionPerServing,
}

impl RecipeDraft {
    /// The provider's serving count wins; otherwise the requested one is echoed.
    pub fn into_recipe(self, requested_servings: u32) -> Recipe {
        Recipe {
            title: self.title,
            ingredients: self.ingredients,
            steps: self.steps,
            servings: self.servings.unwrap_or(requested_servings),
            nutrition_per_serving: self.nutrition_per_serving,
        }
    }
}
