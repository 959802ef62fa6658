use crate::domain::{
    common::entities::app_errors::CoreError,
    completion::CompletionPlan,
    food_analysis::{
        entities::AnalyzeImageResult,
        schema::{DETECTED_ITEMS_SCHEMA_NAME, get_detected_items_schema},
    },
    inference::entities::{ImagePayload, OutputConstraint, UserContent},
};

pub const DETECTION_SYSTEM_INSTRUCTION: &str = "You are an expert food vision assistant. \
Identify the distinct edible food items and common ingredients visible in the image. \
Use short, plain names and estimate a confidence between 0 and 1 for each item.";

pub const DETECTION_USER_INSTRUCTION: &str = "Identify the items. \
Return strictly this JSON shape: { \"items\": [ { \"name\": string, \"confidence\": number between 0 and 1 } ] }";

/// Provider call for one uploaded image: instruction text plus the inline
/// image, constrained to the detected items schema.
pub fn build_detection_plan(image_data: &[u8], mime_type: Option<&str>) -> CompletionPlan {
    CompletionPlan {
        system_instruction: DETECTION_SYSTEM_INSTRUCTION.to_string(),
        user_content: UserContent::TextWithImage {
            text: DETECTION_USER_INSTRUCTION.to_string(),
            image: ImagePayload::from_bytes(image_data, mime_type),
        },
        output_constraint: OutputConstraint::StrictJsonSchema {
            name: DETECTED_ITEMS_SCHEMA_NAME.to_string(),
            schema: get_detected_items_schema(),
        },
    }
}

/// Rejects replies that broke the schema contract instead of clamping them.
pub fn ensure_detections_valid(result: &AnalyzeImageResult) -> Result<(), CoreError> {
    for (index, item) in result.items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(CoreError::MalformedUpstreamResponse(format!(
                "detected item {index} has an empty name"
            )));
        }

        if !(0.0..=1.0).contains(&item.confidence) {
            return Err(CoreError::MalformedUpstreamResponse(format!(
                "detected item `{}` has confidence {} outside [0, 1]",
                item.name, item.confidence
            )));
        }
    }

    Ok(())
}
