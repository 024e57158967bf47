//! Static content loader.
//!
//! Reads published section documents from a directory or from a remote base
//! URL. Every call goes to the source; nothing is cached, so an edit to a
//! document shows up on the next page view.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use fino_integrino_core::SectionId;

use super::documents::SectionDocument;

/// Errors from fetching a section document.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The name is not one of the published documents.
    #[error("unknown document: {0}")]
    UnknownDocument(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {document} failed: {source}")]
    Http {
        document: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{document} returned HTTP {status}")]
    Status { document: String, status: u16 },

    #[error("{document} is malformed: {source}")]
    Malformed {
        document: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoaderError {
    /// Whether the document does not exist, as opposed to failing to load.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownDocument(_) | Self::NotFound(_))
    }
}

#[derive(Debug, Clone)]
enum DocumentSource {
    Directory(PathBuf),
    Remote { client: reqwest::Client, base: Url },
}

/// Fetches `<document>.json` for a section.
#[derive(Debug, Clone)]
pub struct StaticContentLoader {
    source: DocumentSource,
}

impl StaticContentLoader {
    /// Load documents from files in `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: DocumentSource::Directory(dir.into()),
        }
    }

    /// Load documents over HTTP, relative to `base`.
    #[must_use]
    pub fn from_url(client: reqwest::Client, base: Url) -> Self {
        Self {
            source: DocumentSource::Remote { client, base },
        }
    }

    /// Human-readable description of the source, for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.source {
            DocumentSource::Directory(dir) => dir.display().to_string(),
            DocumentSource::Remote { base, .. } => base.to_string(),
        }
    }

    /// Fetch the raw bytes of a document by name (`hero`, `where-to-buy`, ...).
    ///
    /// Only the published document names are accepted.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the name is unknown or the document cannot be read.
    pub async fn fetch_raw(&self, document: &str) -> Result<Vec<u8>, LoaderError> {
        let section = SectionId::from_document(document)
            .ok_or_else(|| LoaderError::UnknownDocument(document.to_string()))?;
        let file_name = format!("{}.json", section.document());

        match &self.source {
            DocumentSource::Directory(dir) => read_file(&dir.join(file_name), document).await,
            DocumentSource::Remote { client, base } => {
                fetch_remote(client, base, &file_name, document).await
            }
        }
    }

    /// Fetch and parse the document for `D`'s section.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the document cannot be read or does not parse.
    pub async fn fetch<D: SectionDocument>(&self) -> Result<D, LoaderError> {
        let document = D::SECTION.document();
        let bytes = self.fetch_raw(document).await?;
        parse(&bytes, document)
    }

    /// Fetch a document, logging and returning `None` on any failure.
    pub async fn load<D: SectionDocument>(&self) -> Option<D> {
        match self.fetch::<D>().await {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(
                    document = D::SECTION.document(),
                    source = %self.describe(),
                    error = %e,
                    "Failed to load section document"
                );
                None
            }
        }
    }

    /// Load a document and merge it over the section defaults.
    pub async fn load_section<D: SectionDocument>(&self) -> Option<D::Section> {
        self.load::<D>().await.map(SectionDocument::into_section)
    }
}

fn parse<T: DeserializeOwned>(bytes: &[u8], document: &str) -> Result<T, LoaderError> {
    serde_json::from_slice(bytes).map_err(|source| LoaderError::Malformed {
        document: document.to_string(),
        source,
    })
}

async fn read_file(path: &Path, document: &str) -> Result<Vec<u8>, LoaderError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LoaderError::NotFound(document.to_string()))
        }
        Err(source) => Err(LoaderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn fetch_remote(
    client: &reqwest::Client,
    base: &Url,
    file_name: &str,
    document: &str,
) -> Result<Vec<u8>, LoaderError> {
    let http_error = |source| LoaderError::Http {
        document: document.to_string(),
        source,
    };

    // The base always ends in '/', and the file name is one of five fixed names.
    let url = base
        .join(file_name)
        .map_err(|_| LoaderError::UnknownDocument(document.to_string()))?;

    let response = client.get(url).send().await.map_err(http_error)?;
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(LoaderError::NotFound(document.to_string()));
    }
    if !status.is_success() {
        return Err(LoaderError::Status {
            document: document.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(http_error)?;
    Ok(bytes.to_vec())
}
