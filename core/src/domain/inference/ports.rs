use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, inference::entities::ProviderRequest};

/// Narrow capability over the external inference provider.
#[cfg_attr(test, mockall::automock)]
pub trait InferenceClient: Send + Sync {
    /// Whether a credential is available. Pipelines refuse to run without one.
    fn is_configured(&self) -> bool;

    /// Runs one completion and returns the raw generated text, which may be
    /// empty. Non-success statuses and transport failures map to
    /// `CoreError::UpstreamFailure`.
    fn execute(
        &self,
        request: ProviderRequest,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
