use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    completion::{complete_structured, ensure_configured},
    inference::ports::InferenceClient,
    recipe::{
        entities::Recipe,
        helpers::build_recipe_plan,
        ports::RecipeService,
        value_objects::{DEFAULT_SERVINGS, GenerateRecipeInput, RecipeDraft},
    },
};

impl<LLM> RecipeService for Service<LLM>
where
    LLM: InferenceClient,
{
    async fn generate_recipe(&self, input: GenerateRecipeInput) -> Result<Recipe, CoreError> {
        // 1. Refuse early without a credential
        ensure_configured(&self.inference_client)?;

        // 2. Validate items and settle the serving count
        if input.items.is_empty() {
            warn!("rejected recipe request without items");
            return Err(CoreError::InvalidInput("Provide items[]".to_string()));
        }

        let items: Vec<String> = input
            .items
            .iter()
            .map(|item| item.trim().to_string())
            .collect();

        if items.iter().any(String::is_empty) {
            warn!("rejected recipe request with a blank item");
            return Err(CoreError::InvalidInput(
                "items[] must not contain blank names".to_string(),
            ));
        }

        let servings = input.servings.unwrap_or(DEFAULT_SERVINGS);
        if servings == 0 {
            return Err(CoreError::InvalidInput(
                "servings must be a positive integer".to_string(),
            ));
        }

        // 3. Ask the provider for one recipe
        let plan = build_recipe_plan(&items, servings);
        let draft: RecipeDraft =
            complete_structured(&self.inference_client, &self.model, plan).await?;

        let recipe = draft.into_recipe(servings);

        info!(
            items = items.len(),
            servings = recipe.servings,
            "recipe generated"
        );

        Ok(recipe)
    }
}
