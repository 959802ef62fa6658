pub mod decode;
pub mod pipeline;

pub use decode::{DecodeError, DecodeShape, Fields, decode};
pub use pipeline::{CompletionPlan, StructuredOutput, complete_structured, ensure_configured};
