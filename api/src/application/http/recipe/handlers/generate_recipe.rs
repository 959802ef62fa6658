use axum::extract::State;
use foodwaste_core::domain::recipe::{
    entities::Recipe, ports::RecipeService, value_objects::GenerateRecipeInput,
};

use crate::application::http::{
    recipe::validators::GenerateRecipeRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/generate-recipe",
    tag = "recipe",
    summary = "Generate a recipe from leftover items",
    description = "Asks the model for one recipe using only the given items plus oil, salt, pepper and water, with nutrition per serving.",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe", body = Recipe),
        (status = 400, description = "Missing items or invalid servings", body = ApiErrorResponse),
        (status = 500, description = "API key unset or unusable provider reply", body = ApiErrorResponse),
        (status = 502, description = "Inference provider request failed", body = ApiErrorResponse)
    ),
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateRecipeRequest>,
) -> Result<Response<Recipe>, ApiError> {
    let servings = payload
        .servings
        .map(u32::try_from)
        .transpose()
        .map_err(|_| ApiError::BadRequest("servings is out of range".to_string()))?;

    let recipe = state
        .service
        .generate_recipe(GenerateRecipeInput {
            items: payload.items,
            servings,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(recipe))
}
