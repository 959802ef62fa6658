#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image_data: Vec<u8>,
    /// Declared type of the upload; blank or missing falls back to JPEG.
    pub mime_type: Option<String>,
}
