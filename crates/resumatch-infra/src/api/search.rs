use futures::future::join_all;
use tracing::debug;

use resumatch_core::ApiError;
use resumatch_core::domain::{ScoredResume, SearchHit, SearchPage, SearchQuery};
use resumatch_shared::dto::{AnswersBody, AskRequest};

use super::ResumatchApi;
use crate::http::PendingRequest;

impl ResumatchApi {
    /// POST /ask/ - retrieve the `k` best matching resumes for a query.
    pub async fn ask(&self, query: &str, k: usize) -> Result<Vec<ScoredResume>, ApiError> {
        let request = PendingRequest::post(self.client.endpoint("ask/")).json(&AskRequest {
            query: query.to_string(),
            k,
        })?;

        let body: AnswersBody<ScoredResume> = self.client.send_json(request).await?;
        Ok(body.answers)
    }

    /// Run a search and attach each hit's resume file name.
    ///
    /// File names are looked up concurrently; a failed lookup falls back to
    /// the resume id instead of failing the search.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchPage, ApiError> {
        let composed = query.compose()?;
        let answers = self.ask(&composed, query.page_size).await?;

        let hits = join_all(answers.into_iter().map(|answer| async move {
            let filename = match self.get_resume(&answer.resume_id).await {
                Ok(resume) => resume.display_name(),
                Err(e) => {
                    debug!(resume_id = %answer.resume_id, error = %e, "Resume lookup failed");
                    answer.resume_id.to_string()
                }
            };
            SearchHit { filename, answer }
        }))
        .await;

        Ok(SearchPage::new(hits, query.page_size))
    }
}
