//! Domain entities - what the client sends to and reads from the backend.

mod account;
mod credentials;
mod history;
mod id;
mod job;
mod resume;
mod search;
mod upload;

pub use account::{Registration, Role};
pub use credentials::TokenPair;
pub use history::{HistoryEntry, MAX_HISTORY_ENTRIES, SearchHistory};
pub use id::ResourceId;
pub use job::{Job, JobDraft, JobSubmission};
pub use resume::{Resume, ResumeChunk};
pub use search::{DEFAULT_PAGE_SIZE, Evidence, ScoredResume, SearchHit, SearchPage, SearchQuery};
pub use upload::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES, UploadFile};
