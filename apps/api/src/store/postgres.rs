use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::progress::{PlatformTotals, Progress};
use crate::models::resume::{encode_records, ResumeDocument, ResumeRow, StoredResume};
use crate::models::user::{NewUser, User};
use crate::store::{ProgressStore, ResumeStore, StoreError, UserStore};

const USER_COLUMNS: &str = "id, username, email, full_name, hashed_password, disabled";

const RESUME_COLUMNS: &str = "id, owner_id, name, email, phone, address, linkedin, github, \
     portfolio, summary, education, experience, projects, skills, certifications, awards, \
     publications, languages, interests, created_at";

const PROGRESS_COLUMNS: &str = "resume_completed, interviews_taken, practice_score";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-constraint violation on `users` to a `Conflict`.
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let field = if db_err.constraint().is_some_and(|c| c.contains("email")) {
                "Email"
            } else {
                "Username"
            };
            return StoreError::Conflict(format!("{field} already registered"));
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, email, full_name, hashed_password) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.full_name)
            .bind(&new_user.hashed_password)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        sqlx::query("INSERT INTO user_progress (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn create_resume(
        &self,
        owner_id: i64,
        document: &ResumeDocument,
    ) -> Result<StoredResume, StoreError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO resumes
                (owner_id, name, email, phone, address, linkedin, github, portfolio, summary,
                 education, experience, projects, skills,
                 certifications, awards, publications, languages, interests)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {RESUME_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ResumeRow>(&query)
            .bind(owner_id)
            .bind(&document.name)
            .bind(&document.email)
            .bind(&document.phone)
            .bind(&document.address)
            .bind(&document.linkedin)
            .bind(&document.github)
            .bind(&document.portfolio)
            .bind(&document.summary)
            .bind(encode_records(&document.education))
            .bind(encode_records(&document.experience))
            .bind(document.projects.as_deref().map(encode_records))
            .bind(&document.skills)
            .bind(&document.certifications)
            .bind(&document.awards)
            .bind(&document.publications)
            .bind(&document.languages)
            .bind(&document.interests)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO user_progress (user_id, resume_completed) VALUES ($1, TRUE) \
             ON CONFLICT (user_id) DO UPDATE SET resume_completed = TRUE",
        )
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        let stored = StoredResume::try_from(row)?;
        tx.commit().await?;
        Ok(stored)
    }

    async fn find_resume(&self, id: i64) -> Result<Option<StoredResume>, StoreError> {
        let query = format!("SELECT {RESUME_COLUMNS} FROM resumes WHERE id = $1");
        let row = sqlx::query_as::<_, ResumeRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredResume::try_from).transpose()?)
    }

    async fn list_resumes_by_owner(&self, owner_id: i64) -> Result<Vec<StoredResume>, StoreError> {
        let query = format!("SELECT {RESUME_COLUMNS} FROM resumes WHERE owner_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, ResumeRow>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| StoredResume::try_from(row).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn find_progress(&self, user_id: i64) -> Result<Option<Progress>, StoreError> {
        let query = format!("SELECT {PROGRESS_COLUMNS} FROM user_progress WHERE user_id = $1");
        Ok(sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn increment_interviews(&self, user_id: i64) -> Result<Progress, StoreError> {
        let query = format!(
            "INSERT INTO user_progress (user_id, interviews_taken) VALUES ($1, 1) \
             ON CONFLICT (user_id) DO UPDATE \
             SET interviews_taken = user_progress.interviews_taken + 1 \
             RETURNING {PROGRESS_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn record_practice_score(
        &self,
        user_id: i64,
        percentage: f64,
    ) -> Result<Progress, StoreError> {
        // Single statement: concurrent submissions cannot lower the stored maximum.
        let query = format!(
            "INSERT INTO user_progress (user_id, practice_score) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE \
             SET practice_score = GREATEST(user_progress.practice_score, EXCLUDED.practice_score) \
             RETURNING {PROGRESS_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Progress>(&query)
            .bind(user_id)
            .bind(percentage)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn platform_totals(&self) -> Result<PlatformTotals, StoreError> {
        Ok(sqlx::query_as::<_, PlatformTotals>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM resumes) AS total_resumes,
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COALESCE(SUM(practice_score), 0)::DOUBLE PRECISION FROM user_progress)
                    AS practice_score_sum
            "#,
        )
        .fetch_one(&self.pool)
        .await?)
    }
}
