//! Storage seam. Business logic talks to these traits only, so the same
//! handlers run against Postgres in production and the in-memory store in
//! tests or database-less deployments.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::progress::{PlatformTotals, Progress};
use crate::models::resume::{RecordDecodeError, ResumeDocument, StoredResume};
use crate::models::user::{NewUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    CorruptRecord(String),
}

impl From<RecordDecodeError> for StoreError {
    fn from(err: RecordDecodeError) -> Self {
        StoreError::CorruptRecord(err.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError>;

    /// Creates the user together with a zeroed progress record.
    /// Fails with `Conflict` if the username or email is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Always inserts a new row; there is no upsert. In the same atomic step
    /// the owner's progress gets `resume_completed = true`, creating the
    /// progress record if it is missing.
    async fn create_resume(
        &self,
        owner_id: i64,
        document: &ResumeDocument,
    ) -> Result<StoredResume, StoreError>;

    async fn find_resume(&self, id: i64) -> Result<Option<StoredResume>, StoreError>;

    /// Every resume of `owner_id`, oldest first.
    async fn list_resumes_by_owner(&self, owner_id: i64) -> Result<Vec<StoredResume>, StoreError>;
}

/// Progress mutations create the record when it is missing and apply the
/// change in one atomic step.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn find_progress(&self, user_id: i64) -> Result<Option<Progress>, StoreError>;

    async fn increment_interviews(&self, user_id: i64) -> Result<Progress, StoreError>;

    /// Sets `practice_score = max(practice_score, percentage)`.
    async fn record_practice_score(
        &self,
        user_id: i64,
        percentage: f64,
    ) -> Result<Progress, StoreError>;

    async fn platform_totals(&self) -> Result<PlatformTotals, StoreError>;
}

/// Everything the handlers need, carried in `AppState` as `Arc<dyn Store>`.
pub trait Store: UserStore + ResumeStore + ProgressStore {}

impl<T: UserStore + ResumeStore + ProgressStore> Store for T {}
