use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub title: String,
    /// Ingredient lines including quantities.
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[schema(minimum = 1)]
    pub servings: u32,
    pub nutrition_per_serving: NutritionPerServing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionPerServing {
    pub calories: f64,
    #[serde(rename = "protein_g")]
    pub protein_grams: f64,
    #[serde(rename = "carbs_g")]
    pub carbs_grams: f64,
    #[serde(rename = "fat_g")]
    pub fat_grams: f64,
}
