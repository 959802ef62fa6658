use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, recipe::router::RecipeApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Food Waste Reducer API"
    ),
    nest(
        (path = "/api", api = FoodAnalysisApiDoc),
        (path = "/api", api = RecipeApiDoc),
    )
)]
pub struct ApiDoc;
