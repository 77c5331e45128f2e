use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, StoredResume};
use crate::models::user::User;
use crate::store::Store;
use crate::validation::{
    check_json, check_list, check_no_nul, check_optional_text, EMAIL_MAX, FULL_NAME_MAX, LINK_MAX,
    PHONE_MAX,
};

/// Creation-time invariants: education, experience and skills must be non-empty.
pub fn validate_document(document: &ResumeDocument) -> Result<(), AppError> {
    if document.education.is_empty() {
        return Err(AppError::Validation(
            "education must contain at least one entry".to_string(),
        ));
    }
    if document.experience.is_empty() {
        return Err(AppError::Validation(
            "experience must contain at least one entry".to_string(),
        ));
    }
    if document.skills.is_empty() {
        return Err(AppError::Validation(
            "skills must contain at least one entry".to_string(),
        ));
    }
    if document.skills.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "skills must not contain blank entries".to_string(),
        ));
    }
    check_fields(document)
}

fn check_fields(document: &ResumeDocument) -> Result<(), AppError> {
    let contact = [
        ("name", document.name.as_deref(), FULL_NAME_MAX),
        ("email", document.email.as_deref(), EMAIL_MAX),
        ("phone", document.phone.as_deref(), PHONE_MAX),
        ("address", document.address.as_deref(), LINK_MAX),
        ("linkedin", document.linkedin.as_deref(), LINK_MAX),
        ("github", document.github.as_deref(), LINK_MAX),
        ("portfolio", document.portfolio.as_deref(), LINK_MAX),
    ];
    for (field, value, max) in contact {
        check_optional_text(field, value, max)?;
    }
    if let Some(summary) = &document.summary {
        check_no_nul("summary", summary)?;
    }

    let records = [
        ("education", Some(&document.education)),
        ("experience", Some(&document.experience)),
        ("projects", document.projects.as_ref()),
    ];
    for (field, list) in records {
        for record in list.into_iter().flatten() {
            for (key, value) in record {
                check_no_nul(field, key)?;
                check_json(field, value)?;
            }
        }
    }

    check_list("skills", &document.skills)?;
    let lists = [
        ("certifications", &document.certifications),
        ("awards", &document.awards),
        ("publications", &document.publications),
        ("languages", &document.languages),
        ("interests", &document.interests),
    ];
    for (field, list) in lists {
        if let Some(list) = list {
            check_list(field, list)?;
        }
    }
    Ok(())
}

/// Stores a new resume for `owner` and marks their resume step complete.
pub async fn build_resume(
    store: &dyn Store,
    owner: &User,
    document: ResumeDocument,
) -> Result<StoredResume, AppError> {
    validate_document(&document)?;

    let stored = store.create_resume(owner.id, &document).await?;

    info!(resume_id = stored.id, owner_id = owner.id, "Resume created");
    Ok(stored)
}

/// Fetches a resume, enforcing exclusive ownership.
pub async fn get_resume(
    store: &dyn Store,
    caller: &User,
    id: i64,
) -> Result<StoredResume, AppError> {
    let resume = store
        .find_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    if resume.owner_id != caller.id {
        return Err(AppError::Forbidden);
    }
    Ok(resume)
}

pub async fn list_resumes(store: &dyn Store, owner: &User) -> Result<Vec<StoredResume>, AppError> {
    Ok(store.list_resumes_by_owner(owner.id).await?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::{MemoryStore, ProgressStore};

    fn user(id: i64, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            full_name: None,
            hashed_password: String::new(),
            disabled: false,
        }
    }

    fn full_document() -> ResumeDocument {
        serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "linkedin": "https://linkedin.com/in/ada",
            "education": [{"degree": "B.Tech", "year": "2023"}],
            "experience": [
                {"company": "ABC", "role": "Dev", "years": "2"},
                {"company": "XYZ", "role": "Intern"}
            ],
            "projects": [{"title": "Engine", "stack": ["Rust", "SQL"]}],
            "skills": ["Rust", "SQL", "React"],
            "certifications": ["AWS SAA"],
            "languages": []
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_build_then_get_round_trips() {
        let store = MemoryStore::new();
        let ada = user(1, "ada");
        let document = full_document();

        let built = build_resume(&store, &ada, document.clone()).await.unwrap();
        let fetched = get_resume(&store, &ada, built.id).await.unwrap();

        assert_eq!(fetched.document, document);
        assert_eq!(fetched.owner_id, ada.id);
        assert_eq!(fetched.document.interests, None);
        assert_eq!(fetched.document.languages, Some(vec![]));
    }

    #[tokio::test]
    async fn test_build_marks_progress() {
        let store = MemoryStore::new();
        let ada = user(1, "ada");
        build_resume(&store, &ada, full_document()).await.unwrap();

        let progress = store.find_progress(ada.id).await.unwrap().unwrap();
        assert!(progress.resume_completed);
    }

    #[tokio::test]
    async fn test_build_always_creates_new_record() {
        let store = MemoryStore::new();
        let ada = user(1, "ada");
        let first = build_resume(&store, &ada, full_document()).await.unwrap();
        let second = build_resume(&store, &ada, full_document()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(list_resumes(&store, &ada).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_other_users_resume_is_forbidden() {
        let store = MemoryStore::new();
        let ada = user(1, "ada");
        let grace = user(2, "grace");
        let built = build_resume(&store, &ada, full_document()).await.unwrap();

        let err = get_resume(&store, &grace, built.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert!(list_resumes(&store, &grace).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_resume_is_not_found() {
        let store = MemoryStore::new();
        let err = get_resume(&store, &user(1, "ada"), 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_required_sections_are_enforced() {
        let store = MemoryStore::new();
        let ada = user(1, "ada");

        let mut document = full_document();
        document.education.clear();
        assert!(matches!(
            build_resume(&store, &ada, document).await,
            Err(AppError::Validation(_))
        ));

        let mut document = full_document();
        document.skills = vec!["Rust".into(), "  ".into()];
        assert!(matches!(
            build_resume(&store, &ada, document).await,
            Err(AppError::Validation(_))
        ));

        assert_eq!(store.find_progress(ada.id).await.unwrap(), None);
    }
}
