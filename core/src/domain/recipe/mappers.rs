use crate::domain::{
    completion::{DecodeError, DecodeShape, Fields, StructuredOutput},
    recipe::{entities::NutritionPerServing, value_objects::RecipeDraft},
};

impl DecodeShape for NutritionPerServing {
    fn decode_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            calories: fields.number(&["calories", "kcal"])?,
            protein_grams: fields.number(&["protein_g", "proteinGrams", "protein"])?,
            carbs_grams: fields.number(&["carbs_g", "carbsGrams", "carbs"])?,
            fat_grams: fields.number(&["fat_g", "fatGrams", "fat"])?,
        })
    }
}

impl DecodeShape for RecipeDraft {
    fn decode_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        let servings = fields.optional_u32(&["servings"])?;
        if servings == Some(0) {
            return Err(DecodeError::WrongType {
                field: "servings".to_string(),
                expected: "a positive integer",
            });
        }

        Ok(Self {
            title: fields.string(&["title"])?,
            ingredients: fields.string_list(&["ingredients"])?,
            steps: fields.string_list(&["steps"])?,
            servings,
            nutrition_per_serving: NutritionPerServing::decode_fields(
                &fields.object(&["nutrition_per_serving", "nutritionPerServing", "nutrition"])?,
            )?,
        })
    }
}

/// Empty completions are malformed for recipes.
impl StructuredOutput for RecipeDraft {}
