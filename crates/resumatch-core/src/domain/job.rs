use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResourceId;
use crate::error::ApiError;

/// A job posting stored on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A validated job posting ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
}

impl JobDraft {
    /// Build a draft from form input.
    ///
    /// `requirements` is a comma-separated list; entries are trimmed and
    /// empty ones dropped.
    pub fn from_form(title: &str, description: &str, requirements: &str) -> Result<Self, ApiError> {
        let draft = Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            requirements: split_requirements(requirements),
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ApiError::validation("Title and Description are required."));
        }
        Ok(())
    }
}

fn split_requirements(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

/// One logical job submission.
///
/// The idempotency key is generated once here and reused for every HTTP
/// attempt of the same submission.
#[derive(Debug, Clone)]
pub struct JobSubmission {
    pub draft: JobDraft,
    pub idempotency_key: Uuid,
}

impl JobSubmission {
    pub fn new(draft: JobDraft) -> Self {
        Self {
            draft,
            idempotency_key: Uuid::new_v4(),
        }
    }
}
