//! Document repository: one implementation for papers, syllabi, and study
//! materials, parameterized by `DocumentKind`.

use chrono::Utc;
use tracing::debug;

use edu_core::entities::{EducationalDocument, NewDocument};
use edu_core::enums::DocumentKind;
use edu_core::filter::DocumentFilter;

use crate::EduDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};

const DOCUMENT_COLUMNS: &str = "id, title, stream, branch, branch_year, semester, university, \
     examination_year, subject, view_url, download_url, file_name, created_at";

fn row_to_document(row: &libsql::Row) -> Result<EducationalDocument, DatabaseError> {
    let semester = row
        .get::<Option<i64>>(5)?
        .map(u8::try_from)
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("semester out of range: {e}")))?;
    let examination_year = row
        .get::<Option<i64>>(7)?
        .map(i32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("examination year out of range: {e}")))?;

    Ok(EducationalDocument {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        stream: row.get::<String>(2)?,
        branch: row.get::<String>(3)?,
        branch_year: parse_enum(&row.get::<String>(4)?)?,
        semester,
        university: get_opt_string(row, 6)?
            .map(|s| parse_enum(&s))
            .transpose()?,
        examination_year,
        subject: get_opt_string(row, 8)?,
        view_url: row.get::<String>(9)?,
        download_url: row.get::<String>(10)?,
        file_name: get_opt_string(row, 11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

async fn collect_documents(
    mut rows: libsql::Rows,
) -> Result<Vec<EducationalDocument>, DatabaseError> {
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_document(&row)?);
    }
    Ok(results)
}

impl EduDb {
    /// Validate and insert a document into the collection for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with `InvalidRequest` if validation
    /// fails, or `DatabaseError` if the INSERT fails.
    pub async fn insert_document(
        &self,
        kind: DocumentKind,
        doc: &NewDocument,
    ) -> Result<EducationalDocument, DatabaseError> {
        doc.validate()?;

        let now = Utc::now();
        let id = self.generate_id(kind.id_prefix()).await?;

        let sql = format!(
            "INSERT INTO {} ({DOCUMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            kind.table()
        );
        self.conn()
            .execute(
                &sql,
                libsql::params![
                    id.as_str(),
                    doc.title.as_str(),
                    doc.stream.as_str(),
                    doc.branch.as_str(),
                    doc.branch_year.as_str(),
                    doc.semester.map(i64::from),
                    doc.university.map(|u| u.as_str()),
                    doc.examination_year.map(i64::from),
                    doc.subject.as_deref(),
                    doc.view_url.as_str(),
                    doc.download_url.as_str(),
                    doc.file_name.as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(EducationalDocument {
            id,
            title: doc.title.clone(),
            stream: doc.stream.clone(),
            branch: doc.branch.clone(),
            branch_year: doc.branch_year,
            semester: doc.semester,
            university: doc.university,
            examination_year: doc.examination_year,
            subject: doc.subject.clone(),
            view_url: doc.view_url.clone(),
            download_url: doc.download_url.clone(),
            file_name: doc.file_name.clone(),
            created_at: now,
        })
    }

    /// Every document in the collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_documents(
        &self,
        kind: DocumentKind,
    ) -> Result<Vec<EducationalDocument>, DatabaseError> {
        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM {} ORDER BY created_at DESC, rowid DESC",
            kind.table()
        );
        let rows = self.conn().query(&sql, ()).await?;
        collect_documents(rows).await
    }

    /// Documents matching a resolved filter, newest first.
    ///
    /// An empty result is returned as an empty `Vec`; callers decide whether
    /// that is a not-found condition.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_documents(
        &self,
        kind: DocumentKind,
        filter: &DocumentFilter,
    ) -> Result<Vec<EducationalDocument>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        for (field, value) in filter.predicate() {
            params.push(libsql::Value::Text(value.to_string()));
            conditions.push(format!("{} = ?{}", field.column(), params.len()));
        }

        let sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM {} WHERE {}
             ORDER BY created_at DESC, rowid DESC",
            kind.table(),
            conditions.join(" AND ")
        );
        debug!(%kind, %filter, "Querying documents");

        let rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        collect_documents(rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edu_core::enums::{BranchYear, University};
    use edu_core::errors::CoreError;
    use pretty_assertions::assert_eq;

    async fn test_db() -> EduDb {
        EduDb::open_local(":memory:").await.unwrap()
    }

    fn doc(title: &str, stream: &str, branch: &str, year: BranchYear) -> NewDocument {
        NewDocument {
            title: title.to_string(),
            stream: stream.to_string(),
            branch: branch.to_string(),
            branch_year: year,
            semester: Some(1),
            university: Some(University::Rtu),
            examination_year: Some(2024),
            subject: None,
            view_url: format!("https://files.example/{title}.pdf"),
            download_url: format!("https://files.example/{title}.pdf?dl=1"),
            file_name: None,
        }
    }

    fn titles(docs: &[EducationalDocument]) -> Vec<&str> {
        let mut titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
        titles.sort_unstable();
        titles
    }

    #[tokio::test]
    async fn insert_and_list() {
        let db = test_db().await;
        let inserted = db
            .insert_document(
                DocumentKind::Paper,
                &doc("maths", "B.Tech", "CSE", BranchYear::First),
            )
            .await
            .unwrap();
        assert!(inserted.id.starts_with("ppr-"));

        let all = db.list_documents(DocumentKind::Paper).await.unwrap();
        assert_eq!(all, vec![inserted]);
    }

    #[tokio::test]
    async fn collections_are_separate() {
        let db = test_db().await;
        db.insert_document(
            DocumentKind::Syllabus,
            &doc("syllabus", "B.Tech", "CSE", BranchYear::Second),
        )
        .await
        .unwrap();

        assert!(db.list_documents(DocumentKind::Paper).await.unwrap().is_empty());
        assert!(
            db.list_documents(DocumentKind::StudyMaterial)
                .await
                .unwrap()
                .is_empty()
        );
        let syllabi = db.list_documents(DocumentKind::Syllabus).await.unwrap();
        assert_eq!(syllabi.len(), 1);
        assert!(syllabi[0].id.starts_with("syl-"));
    }

    #[tokio::test]
    async fn first_year_btech_matches_across_branches() {
        let db = test_db().await;
        for (title, branch, year) in [
            ("common-physics", "CSE", BranchYear::First),
            ("common-chemistry", "ME", BranchYear::First),
            ("cse-dsa", "CSE", BranchYear::Second),
        ] {
            db.insert_document(DocumentKind::Paper, &doc(title, "B.Tech", branch, year))
                .await
                .unwrap();
        }

        let filter = DocumentFilter::resolve("B.Tech", "ECE", "First Year").unwrap();
        let found = db
            .find_documents(DocumentKind::Paper, &filter)
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["common-chemistry", "common-physics"]);
    }

    #[tokio::test]
    async fn other_years_match_branch() {
        let db = test_db().await;
        for (title, branch) in [("cse-os", "CSE"), ("me-thermo", "ME")] {
            db.insert_document(
                DocumentKind::StudyMaterial,
                &doc(title, "B.Tech", branch, BranchYear::Third),
            )
            .await
            .unwrap();
        }

        let filter = DocumentFilter::resolve("B.Tech", "CSE", "Third Year").unwrap();
        let found = db
            .find_documents(DocumentKind::StudyMaterial, &filter)
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["cse-os"]);
    }

    #[tokio::test]
    async fn first_year_of_other_stream_keeps_branch() {
        let db = test_db().await;
        db.insert_document(
            DocumentKind::Paper,
            &doc("diploma-ce", "Diploma", "Civil", BranchYear::First),
        )
        .await
        .unwrap();

        let filter = DocumentFilter::resolve("Diploma", "Mechanical", "First Year").unwrap();
        let found = db
            .find_documents(DocumentKind::Paper, &filter)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn unknown_branch_year_matches_nothing() {
        let db = test_db().await;
        db.insert_document(
            DocumentKind::Paper,
            &doc("x", "B.Tech", "CSE", BranchYear::Fourth),
        )
        .await
        .unwrap();

        let filter = DocumentFilter::resolve("B.Tech", "CSE", "Fifth Year").unwrap();
        let found = db
            .find_documents(DocumentKind::Paper, &filter)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn invalid_document_rejected() {
        let db = test_db().await;
        let mut bad = doc("bad", "B.Tech", "CSE", BranchYear::First);
        bad.semester = Some(12);
        let err = db
            .insert_document(DocumentKind::Paper, &bad)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidRequest(_))
        ));
        assert!(db.list_documents(DocumentKind::Paper).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn optional_fields_roundtrip() {
        let db = test_db().await;
        let mut material = doc("notes", "BCA", "General", BranchYear::Second);
        material.semester = None;
        material.university = None;
        material.examination_year = None;
        material.subject = Some("Networks".into());
        material.file_name = Some("notes.pdf".into());

        let inserted = db
            .insert_document(DocumentKind::StudyMaterial, &material)
            .await
            .unwrap();
        let listed = db
            .list_documents(DocumentKind::StudyMaterial)
            .await
            .unwrap();
        assert_eq!(listed, vec![inserted]);
        assert_eq!(listed[0].subject.as_deref(), Some("Networks"));
        assert_eq!(listed[0].university, None);
    }
}
