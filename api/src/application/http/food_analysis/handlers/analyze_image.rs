use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use foodwaste_core::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::AnalyzeImageResult, ports::FoodAnalysisService,
        value_objects::AnalyzeImageInput,
    },
};
use tracing::{error, warn};

use crate::application::http::{
    food_analysis::validators::{AnalyzeImageForm, IMAGE_FIELD},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

struct ImageUpload {
    data: Bytes,
    content_type: Option<String>,
}

/// Reads the `image` file, or else the first attached file. Plain text
/// fields are never treated as uploads.
async fn read_image_upload(multipart: &mut Multipart) -> Result<Option<ImageUpload>, ApiError> {
    let mut fallback: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.file_name().is_none() {
            continue;
        }

        let is_image_field = field.name() == Some(IMAGE_FIELD);

        if !is_image_field && fallback.is_some() {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        let upload = ImageUpload { data, content_type };

        if is_image_field {
            return Ok(Some(upload));
        }

        fallback = Some(upload);
    }

    Ok(fallback)
}

#[utoipa::path(
    post,
    path = "/analyze-image",
    tag = "food-analysis",
    summary = "Detect food items in a photo",
    description = "Sends the uploaded photo to the vision model and returns the distinct edible items it recognised, with confidence scores. An empty list is a valid result.",
    request_body(content = AnalyzeImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Detected items", body = AnalyzeImageResult),
        (status = 400, description = "No file, empty file or not multipart", body = ApiErrorResponse),
        (status = 500, description = "API key unset or unusable provider reply", body = ApiErrorResponse),
        (status = 502, description = "Inference provider request failed", body = ApiErrorResponse)
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<AnalyzeImageResult>, ApiError> {
    if !state.service.is_configured() {
        return Err(ApiError::from(CoreError::Unconfigured));
    }

    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected non-multipart upload: {}", e);
        ApiError::BadRequest(format!(
            "Expected multipart/form-data with field '{}'",
            IMAGE_FIELD
        ))
    })?;

    let upload = read_image_upload(&mut multipart)
        .await?
        .filter(|upload| !upload.data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No image uploaded".to_string()))?;

    let result = state
        .service
        .analyze_image(AnalyzeImageInput {
            image_data: upload.data.to_vec(),
            mime_type: upload.content_type,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
