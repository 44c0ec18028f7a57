use std::path::Path;

use serde_json::Value;
use tracing::info;

use resumatch_core::ApiError;
use resumatch_core::domain::{ResourceId, Resume, UploadFile};
use resumatch_shared::dto::ListBody;

use super::ResumatchApi;
use crate::http::{MultipartPart, PendingRequest, decode_json};

/// Page size used when listing resumes without an explicit limit.
pub const DEFAULT_LIST_LIMIT: usize = 10;

impl ResumatchApi {
    /// Validate and upload a resume file from disk.
    ///
    /// Returns the server's record for the new resume, or `null` when the
    /// server sent none.
    pub async fn upload_resume(&self, path: &Path) -> Result<Value, ApiError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ApiError::validation(format!("Cannot read {}: {e}", path.display())))?;
        if !metadata.is_file() {
            return Err(ApiError::validation("Please select a file to upload."));
        }

        let file = UploadFile::validate(path, metadata.len())?;
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::validation(format!("Cannot read {}: {e}", path.display())))?;

        self.upload_resume_bytes(file, data).await
    }

    /// Upload an already validated resume.
    pub async fn upload_resume_bytes(&self, file: UploadFile, data: Vec<u8>) -> Result<Value, ApiError> {
        // The file may have changed since it was validated
        let file = UploadFile::validate(Path::new(&file.file_name), data.len() as u64)?;

        let request = PendingRequest::post(self.client.endpoint("resumes/upload/")).multipart(vec![
            MultipartPart {
                name: "file".to_string(),
                file_name: Some(file.file_name.clone()),
                content_type: Some(file.content_type.to_string()),
                data,
            },
        ]);

        let response = self.client.send(request).await?;
        let body = response.bytes().await.map_err(|_| ApiError::transport())?;
        info!(file = %file.file_name, size = file.size, "Resume uploaded");

        // An empty or non-JSON 2xx body still means the upload succeeded
        Ok(serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    /// GET /resumes/
    ///
    /// `limit` and `offset` are always sent; `q` only when non-empty.
    pub async fn list_resumes(
        &self,
        q: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Resume>, ApiError> {
        let mut request = PendingRequest::get(self.client.endpoint("resumes/"))
            .query("limit", limit)
            .query("offset", offset);
        if let Some(q) = q.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query("q", q);
        }

        let response = self.client.send(request).await?;
        let body: ListBody<Resume> = decode_json(response).await?;
        Ok(body.into_items())
    }

    /// GET /resumes/{id}/
    pub async fn get_resume(&self, id: &ResourceId) -> Result<Resume, ApiError> {
        let request = PendingRequest::get(self.client.endpoint(&format!("resumes/{id}/")));
        self.client.send_json(request).await
    }
}
