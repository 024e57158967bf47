//! Section document tooling.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use fino_integrino_core::SectionId;
use fino_integrino_storefront::content::documents::validate_document;
use fino_integrino_storefront::content::schema::cms_schema;

#[derive(Debug, Error)]
pub enum ContentCommandError {
    #[error(
        "{count} of {total} section documents in {path} are invalid",
        count = .1.len(),
        total = SectionId::ALL.len(),
        path = .0.display()
    )]
    Invalid(PathBuf, Vec<DocumentReport>),

    #[error("Failed to serialize schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Result of checking one section document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Valid,
    /// Absent; the section renders its default copy.
    Missing,
    Unreadable(String),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub section: SectionId,
    pub status: DocumentStatus,
}

impl DocumentReport {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self.status,
            DocumentStatus::Unreadable(_) | DocumentStatus::Invalid(_)
        )
    }
}

impl fmt::Display for DocumentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.section.document();
        match &self.status {
            DocumentStatus::Valid => write!(f, "{name}.json: ok"),
            DocumentStatus::Missing => write!(f, "{name}.json: missing, defaults apply"),
            DocumentStatus::Unreadable(e) => write!(f, "{name}.json: unreadable: {e}"),
            DocumentStatus::Invalid(e) => write!(f, "{name}.json: invalid: {e}"),
        }
    }
}

/// Check every section document in `dir`.
pub async fn check_dir(dir: &Path) -> Vec<DocumentReport> {
    let mut reports = Vec::with_capacity(SectionId::ALL.len());
    for section in SectionId::ALL {
        let path = dir.join(format!("{}.json", section.document()));
        let status = match tokio::fs::read(&path).await {
            Ok(bytes) => match validate_document(section, &bytes) {
                Ok(()) => DocumentStatus::Valid,
                Err(e) => DocumentStatus::Invalid(e.to_string()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DocumentStatus::Missing,
            Err(e) => DocumentStatus::Unreadable(e.to_string()),
        };
        reports.push(DocumentReport { section, status });
    }
    reports
}

/// Validate the documents in `dir`, logging each result.
///
/// # Errors
///
/// Returns `ContentCommandError::Invalid` listing every failed document.
pub async fn validate(dir: &Path) -> Result<(), ContentCommandError> {
    let reports = check_dir(dir).await;
    for report in &reports {
        if report.is_failure() {
            tracing::error!("{report}");
        } else {
            tracing::info!("{report}");
        }
    }

    let failures: Vec<_> = reports.into_iter().filter(DocumentReport::is_failure).collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(ContentCommandError::Invalid(dir.to_path_buf(), failures))
    }
}

/// Print the CMS schema to stdout.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn schema() -> Result<(), ContentCommandError> {
    let json = serde_json::to_string_pretty(&cms_schema())?;

    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(reports: &[DocumentReport], section: SectionId) -> &DocumentStatus {
        &reports
            .iter()
            .find(|report| report.section == section)
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_reports_each_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.json"), r#"{"heading": "Acta"}"#).unwrap();
        std::fs::write(dir.path().join("story.json"), r#"{"titel": "typo"}"#).unwrap();
        std::fs::write(dir.path().join("partnership.json"), "not json").unwrap();

        let reports = check_dir(dir.path()).await;

        assert_eq!(reports.len(), 5);
        assert_eq!(status_of(&reports, SectionId::Home), &DocumentStatus::Valid);
        assert_eq!(
            status_of(&reports, SectionId::Products),
            &DocumentStatus::Missing
        );
        assert!(matches!(
            status_of(&reports, SectionId::Story),
            DocumentStatus::Invalid(_)
        ));
        assert_eq!(reports.iter().filter(|r| r.is_failure()).count(), 2);
    }

    #[tokio::test]
    async fn test_validate_fails_on_bad_document() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate(dir.path()).await.is_ok());

        std::fs::write(dir.path().join("where-to-buy.json"), "[]").unwrap();
        let err = validate(dir.path()).await.unwrap_err().to_string();
        assert!(err.starts_with("1 of 5 section documents in "), "{err}");
    }

    #[tokio::test]
    async fn test_shipped_documents_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/content");
        let reports = check_dir(&dir).await;
        assert!(
            reports.iter().all(|r| r.status == DocumentStatus::Valid),
            "{reports:?}"
        );
    }
}
