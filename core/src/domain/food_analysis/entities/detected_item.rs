use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One edible item the provider found in the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectedItem {
    #[schema(example = "egg")]
    pub name: String,
    /// Provider confidence, within `[0, 1]`.
    #[schema(example = 0.9, minimum = 0, maximum = 1)]
    pub confidence: f64,
}

impl DetectedItem {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Items in the order the provider emitted them. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeImageResult {
    pub items: Vec<DetectedItem>,
}
