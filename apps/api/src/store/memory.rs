use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::progress::{PlatformTotals, Progress};
use crate::models::resume::{ResumeDocument, StoredResume};
use crate::models::user::{NewUser, User};
use crate::store::{ProgressStore, ResumeStore, StoreError, UserStore};

#[derive(Default)]
struct MemoryState {
    /// Keyed by username.
    users: HashMap<String, User>,
    last_user_id: i64,
    resumes: BTreeMap<i64, StoredResume>,
    last_resume_id: i64,
    /// Keyed by user id.
    progress: HashMap<i64, Progress>,
}

/// Process-local store. Every mutation runs under a single write guard, so
/// read-modify-write updates are atomic. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts are disabled out of band; the API has no route for it.
    #[cfg(test)]
    pub async fn set_user_disabled(&self, user_id: i64, disabled: bool) {
        let mut state = self.state.write().await;
        if let Some(user) = state.users.values_mut().find(|u| u.id == user_id) {
            user.disabled = disabled;
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(username).cloned())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .any(|u| u.email == email))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.contains_key(&new_user.username) {
            return Err(StoreError::Conflict("Username already registered".into()));
        }
        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict("Email already registered".into()));
        }

        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            hashed_password: new_user.hashed_password,
            disabled: false,
        };
        state.users.insert(user.username.clone(), user.clone());
        state.progress.insert(user.id, Progress::default());
        Ok(user)
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn create_resume(
        &self,
        owner_id: i64,
        document: &ResumeDocument,
    ) -> Result<StoredResume, StoreError> {
        let mut state = self.state.write().await;
        state.progress.entry(owner_id).or_default().resume_completed = true;
        state.last_resume_id += 1;
        let resume = StoredResume {
            id: state.last_resume_id,
            owner_id,
            document: document.clone(),
            created_at: Utc::now(),
        };
        state.resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn find_resume(&self, id: i64) -> Result<Option<StoredResume>, StoreError> {
        Ok(self.state.read().await.resumes.get(&id).cloned())
    }

    async fn list_resumes_by_owner(&self, owner_id: i64) -> Result<Vec<StoredResume>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .resumes
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn find_progress(&self, user_id: i64) -> Result<Option<Progress>, StoreError> {
        Ok(self.state.read().await.progress.get(&user_id).copied())
    }

    async fn increment_interviews(&self, user_id: i64) -> Result<Progress, StoreError> {
        let mut state = self.state.write().await;
        let progress = state.progress.entry(user_id).or_default();
        progress.interviews_taken += 1;
        Ok(*progress)
    }

    async fn record_practice_score(
        &self,
        user_id: i64,
        percentage: f64,
    ) -> Result<Progress, StoreError> {
        let mut state = self.state.write().await;
        let progress = state.progress.entry(user_id).or_default();
        progress.practice_score = progress.practice_score.max(percentage);
        Ok(*progress)
    }

    async fn platform_totals(&self) -> Result<PlatformTotals, StoreError> {
        let state = self.state.read().await;
        Ok(PlatformTotals {
            total_resumes: state.resumes.len() as i64,
            total_users: state.users.len() as i64,
            practice_score_sum: state.progress.values().map(|p| p.practice_score).sum(),
        })
    }
}
