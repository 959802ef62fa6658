use crate::domain::{
    completion::{DecodeError, DecodeShape, Fields, StructuredOutput},
    food_analysis::entities::{AnalyzeImageResult, DetectedItem},
};

impl DecodeShape for DetectedItem {
    fn decode_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: fields.string(&["name"])?,
            confidence: fields.number(&["confidence"])?,
        })
    }
}

impl DecodeShape for AnalyzeImageResult {
    fn decode_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        let items = fields
            .objects(&["items"])?
            .iter()
            .map(DetectedItem::decode_fields)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }
}

impl StructuredOutput for AnalyzeImageResult {
    /// Nothing recognisable in the photo is a legitimate answer.
    fn empty_completion() -> Option<Self> {
        Some(Self::default())
    }
}
