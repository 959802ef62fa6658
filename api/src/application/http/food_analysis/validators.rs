use utoipa::ToSchema;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// Largest accepted request body for an image upload.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Documentation shape of the `multipart/form-data` upload.
#[derive(Debug, ToSchema)]
pub struct AnalyzeImageForm {
    /// Photo of the food. When absent, the first attached file is used.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
