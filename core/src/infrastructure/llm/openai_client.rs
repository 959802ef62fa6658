use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    inference::{
        entities::{OutputConstraint, ProviderRequest, UserContent},
        ports::InferenceClient,
    },
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions client for OpenAI and compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiInferenceClient {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseFormat<'a> {
    JsonSchema { json_schema: JsonSchemaFormat<'a> },
    JsonObject,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_provider_request(request: &'a ProviderRequest) -> Self {
        let user_content = match &request.user_content {
            UserContent::Text(text) => MessageContent::Text(text),
            UserContent::TextWithImage { text, image } => MessageContent::Parts(vec![
                ContentPart::Text { text },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: &image.data_url,
                    },
                },
            ]),
        };

        let response_format = match &request.output_constraint {
            OutputConstraint::None => None,
            OutputConstraint::StrictJsonSchema { name, schema } => {
                Some(ResponseFormat::JsonSchema {
                    json_schema: JsonSchemaFormat {
                        name,
                        strict: true,
                        schema,
                    },
                })
            }
            OutputConstraint::JsonObject => Some(ResponseFormat::JsonObject),
        };

        Self {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(&request.system_instruction),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            response_format,
        }
    }
}

/// Text of the first choice. A missing choice or null content reads as an
/// empty completion; deciding whether that is acceptable is up to the caller.
fn extract_completion_text(body: &str) -> Result<String, CoreError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse chat completion envelope: {}", e);
        CoreError::MalformedUpstreamResponse(format!(
            "unreadable chat completion envelope: {}",
            e
        ))
    })?;

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}

impl OpenAiInferenceClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CoreError::InternalServerError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn call_chat_completions(
        &self,
        api_key: &str,
        request: ChatCompletionRequest<'_>,
    ) -> Result<String, CoreError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(timeout = e.is_timeout(), "Inference API request failed: {}", e);
                let message = if e.is_timeout() {
                    "inference provider timed out"
                } else {
                    "inference provider unreachable"
                };
                CoreError::UpstreamFailure {
                    status: None,
                    message: message.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read inference API response: {}", e);
            CoreError::UpstreamFailure {
                status: Some(status.as_u16()),
                message: "failed to read inference provider response".to_string(),
            }
        })?;

        if !status.is_success() {
            tracing::error!("Inference API error: {} - {}", status, body);
            return Err(CoreError::UpstreamFailure {
                status: Some(status.as_u16()),
                message: format!("inference provider returned {}", status),
            });
        }

        extract_completion_text(&body)
    }
}

impl InferenceClient for OpenAiInferenceClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn execute(&self, request: ProviderRequest) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or(CoreError::Unconfigured)?;

        tracing::debug!(
            model = %request.model,
            has_image = request.user_content.image().is_some(),
            "sending chat completion request"
        );

        self.call_chat_completions(api_key, ChatCompletionRequest::from_provider_request(&request))
            .await
    }
}
