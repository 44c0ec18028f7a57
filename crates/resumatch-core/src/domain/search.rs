use serde::{Deserialize, Serialize};

use super::ResourceId;
use crate::error::ApiError;

/// Default number of answers requested per search page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// A text excerpt supporting a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub text: String,
}

/// A resume scored against a query or job, as returned by `/ask/` and
/// `/jobs/{id}/match/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResume {
    pub resume_id: ResourceId,
    pub score: f64,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// A free-text resume search with optional filters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub location: Option<String>,
    pub experience: Option<String>,
    pub page_size: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            location: None,
            experience: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = non_blank(experience.into());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The query string sent to the retrieval endpoint, filters appended as
    /// `location:<x>` and `experience:<y>` terms.
    pub fn compose(&self) -> Result<String, ApiError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ApiError::validation("Please enter a search query."));
        }

        let mut composed = text.to_string();
        if let Some(location) = &self.location {
            composed.push_str(&format!(" location:{}", location));
        }
        if let Some(experience) = &self.experience {
            composed.push_str(&format!(" experience:{}", experience));
        }
        Ok(composed)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A search answer enriched with the resume's file name.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub filename: String,
    pub answer: ScoredResume,
}

/// One page of search results, best score first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub has_more: bool,
}

impl SearchPage {
    pub fn new(mut hits: Vec<SearchHit>, page_size: usize) -> Self {
        hits.sort_by(|a, b| b.answer.score.total_cmp(&a.answer.score));
        let has_more = hits.len() == page_size;
        Self { hits, has_more }
    }
}
