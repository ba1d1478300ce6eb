use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{BranchYear, University};
use crate::errors::CoreError;

/// Valid semester numbers.
pub const SEMESTER_RANGE: std::ops::RangeInclusive<u8> = 1..=8;

/// A question paper, syllabus entry, or study-material entry.
///
/// The three collections share this shape; the collection a document lives in
/// is carried by `DocumentKind`, not by the record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EducationalDocument {
    pub id: String,
    pub title: String,
    pub stream: String,
    pub branch: String,
    pub branch_year: BranchYear,
    pub semester: Option<u8>,
    pub university: Option<University>,
    pub examination_year: Option<i32>,
    pub subject: Option<String>,
    pub view_url: String,
    pub download_url: String,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a document.
///
/// Accepts the field spellings used by earlier exports (`courseTitle`,
/// `materialTitle`, `url`, `pdfUrl`, `universityName`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[serde(alias = "courseTitle", alias = "materialTitle")]
    pub title: String,
    pub stream: String,
    pub branch: String,
    pub branch_year: BranchYear,
    #[serde(default)]
    pub semester: Option<u8>,
    #[serde(default, alias = "universityName")]
    pub university: Option<University>,
    #[serde(default)]
    pub examination_year: Option<i32>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(alias = "url", alias = "pdfUrl")]
    pub view_url: String,
    pub download_url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl NewDocument {
    /// Check required fields and the semester range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRequest` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("title", &self.title),
            ("stream", &self.stream),
            ("branch", &self.branch),
            ("viewUrl", &self.view_url),
            ("downloadUrl", &self.download_url),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidRequest(format!("{field} is required")));
            }
        }
        if let Some(semester) = self.semester {
            if !SEMESTER_RANGE.contains(&semester) {
                return Err(CoreError::InvalidRequest(format!(
                    "semester must be between 1 and 8, got {semester}"
                )));
            }
        }
        Ok(())
    }
}
