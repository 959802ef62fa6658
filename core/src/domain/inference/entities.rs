use base64::{Engine as _, engine::general_purpose};

/// Mime type assumed when an upload does not declare one. Nothing sniffs the
/// bytes, so a mislabelled upload reaches the provider as-is.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Canonical request handed to the inference provider, independent of any
/// vendor wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub model: String,
    pub system_instruction: String,
    pub user_content: UserContent,
    pub output_constraint: OutputConstraint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserContent {
    Text(String),
    TextWithImage { text: String, image: ImagePayload },
}

impl UserContent {
    pub fn text(&self) -> &str {
        match self {
            UserContent::Text(text) => text,
            UserContent::TextWithImage { text, .. } => text,
        }
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        match self {
            UserContent::Text(_) => None,
            UserContent::TextWithImage { image, .. } => Some(image),
        }
    }
}

/// Image inlined into the request as a `data:` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data_url: String,
}

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8], mime_type: Option<&str>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
            .to_string();
        let payload = general_purpose::STANDARD.encode(bytes);

        Self {
            data_url: format!("data:{mime_type};base64,{payload}"),
            mime_type,
        }
    }
}

/// How tightly the provider is asked to shape its reply.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputConstraint {
    None,
    /// The reply must match `schema` exactly; no extra properties.
    StrictJsonSchema {
        name: String,
        schema: serde_json::Value,
    },
    /// The reply must be some JSON object, shape unchecked.
    JsonObject,
}
