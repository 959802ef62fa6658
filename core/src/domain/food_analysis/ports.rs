use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{entities::AnalyzeImageResult, value_objects::AnalyzeImageInput},
};

/// Service trait for detecting edible items in a photo
pub trait FoodAnalysisService: Send + Sync {
    fn analyze_image(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AnalyzeImageResult, CoreError>> + Send;
}
