//! Request schemas referenced by the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart body for `POST /transcribe`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PipelineUpload {
    /// The audio file to run through the pipeline.
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}
