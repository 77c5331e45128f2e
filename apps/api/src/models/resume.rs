use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use thiserror::Error;

/// A free-form key/value sub-record (one education entry, one job, one project).
pub type Record = Map<String, Value>;

/// The resume document as submitted by the client and returned on read.
///
/// Optional lists are `None` when never provided, which is kept distinct from
/// an explicitly empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub summary: Option<String>,

    pub education: Vec<Record>,
    pub experience: Vec<Record>,
    pub projects: Option<Vec<Record>>,
    pub skills: Vec<String>,

    pub certifications: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
    pub publications: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
}

/// A persisted resume with its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredResume {
    pub id: i64,
    pub owner_id: i64,
    #[serde(flatten)]
    pub document: ResumeDocument,
    pub created_at: DateTime<Utc>,
}

/// Raw `resumes` row. Structured sub-records come back as untyped JSON and
/// must pass through [`StoredResume::try_from`] before use.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub summary: Option<String>,
    pub education: Value,
    pub experience: Value,
    pub projects: Option<Value>,
    pub skills: Vec<String>,
    pub certifications: Option<Vec<String>>,
    pub awards: Option<Vec<String>>,
    pub publications: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq)]
#[error("resume {resume_id}: field '{field}' is not a list of records ({reason})")]
pub struct RecordDecodeError {
    pub resume_id: i64,
    pub field: &'static str,
    pub reason: String,
}

/// Encodes sub-records for a JSONB column.
pub fn encode_records(records: &[Record]) -> Value {
    Value::Array(records.iter().cloned().map(Value::Object).collect())
}

fn decode_records(
    resume_id: i64,
    field: &'static str,
    value: Value,
) -> Result<Vec<Record>, RecordDecodeError> {
    let fail = |reason: String| RecordDecodeError {
        resume_id,
        field,
        reason,
    };

    let items = match value {
        Value::Array(items) => items,
        other => return Err(fail(format!("expected array, found {}", json_kind(&other)))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(fail(format!("item {i} is {}", json_kind(&other)))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<ResumeRow> for StoredResume {
    type Error = RecordDecodeError;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let projects = row
            .projects
            .map(|value| decode_records(id, "projects", value))
            .transpose()?;

        Ok(StoredResume {
            id,
            owner_id: row.owner_id,
            document: ResumeDocument {
                name: row.name,
                email: row.email,
                phone: row.phone,
                address: row.address,
                linkedin: row.linkedin,
                github: row.github,
                portfolio: row.portfolio,
                summary: row.summary,
                education: decode_records(id, "education", row.education)?,
                experience: decode_records(id, "experience", row.experience)?,
                projects,
                skills: row.skills,
                certifications: row.certifications,
                awards: row.awards,
                publications: row.publications,
                languages: row.languages,
                interests: row.interests,
            },
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(education: Value, projects: Option<Value>) -> ResumeRow {
        ResumeRow {
            id: 7,
            owner_id: 1,
            name: Some("Ada".into()),
            email: None,
            phone: None,
            address: None,
            linkedin: None,
            github: None,
            portfolio: None,
            summary: None,
            education,
            experience: json!([{"company": "ABC", "role": "Dev", "years": 2}]),
            projects,
            skills: vec!["Rust".into(), "SQL".into()],
            certifications: None,
            awards: Some(vec![]),
            publications: None,
            languages: None,
            interests: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_decodes_into_typed_records() {
        let stored = StoredResume::try_from(row(
            json!([{"degree": "B.Tech", "year": "2023"}]),
            None,
        ))
        .unwrap();

        assert_eq!(stored.document.education.len(), 1);
        assert_eq!(stored.document.education[0]["degree"], "B.Tech");
        assert_eq!(stored.document.experience[0]["years"], 2);
        assert_eq!(stored.document.projects, None);
        assert_eq!(stored.document.awards, Some(vec![]));
    }

    #[test]
    fn test_non_array_is_reported_not_emptied() {
        let err = StoredResume::try_from(row(json!("B.Tech 2023"), None)).unwrap_err();
        assert_eq!(err.field, "education");
        assert_eq!(err.resume_id, 7);
        assert!(err.reason.contains("string"));
    }

    #[test]
    fn test_non_object_item_is_reported() {
        let err =
            StoredResume::try_from(row(json!([]), Some(json!([{"title": "x"}, 3])))).unwrap_err();
        assert_eq!(err.field, "projects");
        assert!(err.reason.contains("item 1"));
    }

    #[test]
    fn test_encode_then_decode_preserves_records() {
        let records: Vec<Record> = vec![
            json!({"degree": "M.Sc", "gpa": 3.9}).as_object().unwrap().clone(),
            json!({"degree": "B.Sc"}).as_object().unwrap().clone(),
        ];
        let decoded = decode_records(1, "education", encode_records(&records)).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn test_missing_optional_lists_deserialize_as_absent() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "education": [{"degree": "B.Tech"}],
            "experience": [{"company": "ABC"}],
            "skills": ["Rust"],
            "languages": []
        }))
        .unwrap();

        assert_eq!(doc.projects, None);
        assert_eq!(doc.certifications, None);
        assert_eq!(doc.languages, Some(vec![]));
        assert_eq!(doc.name, None);
    }
}
