use serde::{Deserialize, Serialize};

use super::ResourceId;

/// An uploaded resume as reported by the backend.
///
/// List responses usually omit `chunks`; the detail endpoint includes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: ResourceId,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chunks: Vec<ResumeChunk>,
}

/// A text fragment the backend extracted from a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeChunk {
    pub id: ResourceId,
    pub chunk_text: String,
}

impl Resume {
    /// Name to show for this resume, falling back to its id.
    pub fn display_name(&self) -> String {
        self.filename
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}
