use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct GenerateRecipeRequest {
    /// Names of the items to cook with. Must not be empty.
    #[serde(default)]
    #[schema(example = json!(["egg", "spinach"]))]
    pub items: Vec<String>,
    /// Defaults to 2.
    #[validate(range(min = 1, message = "servings must be a positive integer"))]
    #[schema(example = 2, minimum = 1)]
    pub servings: Option<i64>,
}
