use tracing::info;
use uuid::Uuid;

use resumatch_core::ApiError;
use resumatch_core::domain::{Job, JobDraft, JobSubmission, ResourceId, ScoredResume};
use resumatch_shared::dto::{CreateJobRequest, ListBody, MatchRequest, MatchesBody};

use super::ResumatchApi;
use crate::http::{PendingRequest, decode_json};

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Matches requested when no count is given.
pub const DEFAULT_TOP_N: usize = 10;

impl ResumatchApi {
    /// POST /jobs/
    ///
    /// Pass the same `idempotency_key` when retrying one logical submission.
    pub async fn create_job(
        &self,
        draft: &JobDraft,
        idempotency_key: Option<Uuid>,
    ) -> Result<Job, ApiError> {
        draft.validate()?;

        let mut request = PendingRequest::post(self.client.endpoint("jobs/")).json(&CreateJobRequest {
            title: draft.title.clone(),
            description: draft.description.clone(),
            requirements: draft.requirements.clone(),
        })?;
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_KEY_HEADER, &key.to_string())?;
        }

        let job: Job = self.client.send_json(request).await?;
        info!(job_id = %job.id, title = %job.title, "Job created");
        Ok(job)
    }

    /// Create a job for a submission, using its idempotency key.
    pub async fn submit_job(&self, submission: &JobSubmission) -> Result<Job, ApiError> {
        self.create_job(&submission.draft, Some(submission.idempotency_key))
            .await
    }

    /// GET /jobs/list/ - a body without `results` is an empty list.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let request = PendingRequest::get(self.client.endpoint("jobs/list/"));
        let response = self.client.send(request).await?;
        let body: ListBody<Job> = decode_json(response).await?;
        Ok(body.into_items())
    }

    /// POST /jobs/{id}/match/ - the `top_n` resumes best matching a job.
    pub async fn match_job(&self, id: &ResourceId, top_n: usize) -> Result<Vec<ScoredResume>, ApiError> {
        let request = PendingRequest::post(self.client.endpoint(&format!("jobs/{id}/match/")))
            .json(&MatchRequest { top_n })?;

        let body: MatchesBody<ScoredResume> = self.client.send_json(request).await?;
        Ok(body.matches)
    }
}
