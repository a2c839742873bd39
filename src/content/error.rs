//! Errors raised while loading and rendering articles

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the content pipeline
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content store unavailable at {path:?}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Article not found: {slug}")]
    ArticleNotFound { slug: String },

    #[error("Malformed front-matter in {slug}: {message}")]
    MalformedFrontMatter { slug: String, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Whether the error means "there is no such article"
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::ArticleNotFound { .. })
    }

    pub(crate) fn render(message: impl ToString) -> Self {
        ContentError::RenderError {
            message: message.to_string(),
        }
    }
}
