use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    completion::{complete_structured, ensure_configured},
    food_analysis::{
        entities::AnalyzeImageResult,
        helpers::{build_detection_plan, ensure_detections_valid},
        ports::FoodAnalysisService,
        value_objects::AnalyzeImageInput,
    },
    inference::ports::InferenceClient,
};

impl<LLM> FoodAnalysisService for Service<LLM>
where
    LLM: InferenceClient,
{
    async fn analyze_image(&self, input: AnalyzeImageInput) -> Result<AnalyzeImageResult, CoreError> {
        // 1. Refuse early without a credential
        ensure_configured(&self.inference_client)?;

        // 2. Validate the upload
        if input.image_data.is_empty() {
            warn!("rejected empty image upload");
            return Err(CoreError::InvalidInput("No image uploaded".to_string()));
        }

        // 3. Build and run the constrained completion
        let plan = build_detection_plan(&input.image_data, input.mime_type.as_deref());
        let result: AnalyzeImageResult =
            complete_structured(&self.inference_client, &self.model, plan).await?;

        // 4. Hold the provider to the schema it was given
        ensure_detections_valid(&result)?;

        info!(items = result.items.len(), "image analysis completed");

        Ok(result)
    }
}
