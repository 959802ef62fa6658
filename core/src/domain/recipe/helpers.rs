use crate::domain::{
    completion::CompletionPlan,
    inference::entities::{OutputConstraint, UserContent},
    recipe::value_objects::PANTRY_STAPLES,
};

pub fn recipe_system_instruction() -> String {
    format!(
        "You are a chef and nutritionist. Create practical recipes that minimise food waste, \
using only the provided items plus pantry staples ({}).",
        PANTRY_STAPLES.join(", ")
    )
}

pub fn recipe_user_instruction(items: &[String], servings: u32) -> String {
    format!(
        "Items: {}. Create one recipe with a title, an ingredient list with quantities, \
clear ordered steps, servings={servings}, and nutrition per serving \
(calories, protein_g, carbs_g, fat_g). Output strictly one JSON object with the keys \
\"title\" (string), \"ingredients\" (array of strings), \"steps\" (array of strings), \
\"servings\" (integer) and \"nutrition_per_serving\" (object with numeric \
\"calories\", \"protein_g\", \"carbs_g\", \"fat_g\").",
        items.join(", ")
    )
}

/// Text-only provider call, loosely constrained to a JSON object.
pub fn build_recipe_plan(items: &[String], servings: u32) -> CompletionPlan {
    CompletionPlan {
        system_instruction: recipe_system_instruction(),
        user_content: UserContent::Text(recipe_user_instruction(items, servings)),
        output_constraint: OutputConstraint::JsonObject,
    }
}
