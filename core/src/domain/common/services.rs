use crate::domain::inference::ports::InferenceClient;

/// Entry point for both pipelines. Holds no per-request state, so one
/// instance is shared by every concurrent request.
#[derive(Debug, Clone)]
pub struct Service<LLM>
where
    LLM: InferenceClient,
{
    pub(crate) inference_client: LLM,
    pub(crate) model: String,
}

impl<LLM> Service<LLM>
where
    LLM: InferenceClient,
{
    pub fn new(inference_client: LLM, model: impl Into<String>) -> Self {
        Self {
            inference_client,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inference_client.is_configured()
    }
}
