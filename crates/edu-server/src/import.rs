//! Bulk import of documents from a JSON array file.

use std::path::Path;

use anyhow::Context;
use edu_core::entities::NewDocument;
use edu_core::enums::DocumentKind;
use edu_db::EduDb;
use tracing::info;

/// Insert every document in `path` into the `kind` collection.
///
/// The whole file is validated before anything is written, so a bad entry
/// leaves the collection untouched. Returns the number of inserted documents.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an entry fails
/// validation, or an insert fails.
pub async fn import_documents(
    db: &EduDb,
    kind: DocumentKind,
    path: &Path,
) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let documents: Vec<NewDocument> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {} as a JSON array", path.display()))?;

    for (index, document) in documents.iter().enumerate() {
        document
            .validate()
            .with_context(|| format!("entry {index} ('{}') is invalid", document.title))?;
    }

    for document in &documents {
        db.insert_document(kind, document)
            .await
            .with_context(|| format!("failed to insert '{}'", document.title))?;
    }

    info!(count = documents.len(), %kind, "Imported documents");
    Ok(documents.len())
}
