use tracing::{debug, error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    completion::decode::{DecodeShape, decode},
    inference::{
        entities::{OutputConstraint, ProviderRequest, UserContent},
        ports::InferenceClient,
    },
};

/// Everything a pipeline decides about one provider call. The model is
/// filled in by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionPlan {
    pub system_instruction: String,
    pub user_content: UserContent,
    pub output_constraint: OutputConstraint,
}

impl CompletionPlan {
    pub fn into_request(self, model: &str) -> ProviderRequest {
        ProviderRequest {
            model: model.to_string(),
            system_instruction: self.system_instruction,
            user_content: self.user_content,
            output_constraint: self.output_constraint,
        }
    }
}

/// Target shape of a structured completion.
pub trait StructuredOutput: DecodeShape {
    /// Value to return when the provider sends back no text at all.
    /// `None` makes an empty completion a malformed response.
    fn empty_completion() -> Option<Self> {
        None
    }
}

pub fn ensure_configured<C: InferenceClient>(client: &C) -> Result<(), CoreError> {
    if client.is_configured() {
        Ok(())
    } else {
        warn!("inference request refused: provider API key is not configured");
        Err(CoreError::Unconfigured)
    }
}

/// Builds the provider request, runs it once and decodes the reply into `T`.
/// There are no retries; every failure is returned to the caller.
pub async fn complete_structured<C, T>(
    client: &C,
    model: &str,
    plan: CompletionPlan,
) -> Result<T, CoreError>
where
    C: InferenceClient,
    T: StructuredOutput,
{
    let shape = std::any::type_name::<T>();
    let text = client.execute(plan.into_request(model)).await?;

    if text.trim().is_empty() {
        return T::empty_completion().ok_or_else(|| {
            error!(shape, "inference provider returned an empty completion");
            CoreError::MalformedUpstreamResponse(
                "inference provider returned an empty completion".to_string(),
            )
        });
    }

    debug!(shape, length = text.len(), "decoding completion");

    decode::<T>(&text).map_err(|e| {
        error!(shape, error = %e, "failed to decode completion");
        CoreError::from(e)
    })
}
