use tracing::warn;

use crate::{
    domain::{
        common::{FoodWasteConfig, entities::app_errors::CoreError, services::Service},
        inference::ports::InferenceClient,
    },
    infrastructure::llm::OpenAiInferenceClient,
};

pub type FoodWasteService = Service<OpenAiInferenceClient>;

pub fn create_service(config: FoodWasteConfig) -> Result<FoodWasteService, CoreError> {
    let inference_client = OpenAiInferenceClient::new(&config.llm)?;

    if !inference_client.is_configured() {
        warn!("Inference API key is not configured. Endpoints will return 500 until it is set.");
    }

    Ok(Service::new(inference_client, config.llm.model))
}
