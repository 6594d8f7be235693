use serde::{Deserialize, Serialize};

/// A user-supplied product photo for try-on generation, carried as base64 so
/// it can be forwarded to the generation API as an inline part.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputImage {
    pub mime_type: String,
    pub data_base64: String,
}
