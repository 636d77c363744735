/// Error types for tree decoration runs.
use thiserror::Error;

/// Fatal errors raised while loading, decorating or exporting a tree.
/// Degenerate slabs and rejected lights are not errors; they are skipped locally.
#[derive(Debug, Error)]
pub enum DecorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LAS error: {0}")]
    Las(#[from] las::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Progress template error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),

    #[error("Malformed point cloud {path}: {reason}")]
    Schema { path: String, reason: String },

    #[error("Point cloud {0} contains no points")]
    EmptyCloud(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DecorError {
    pub(crate) fn schema(path: &str, reason: impl Into<String>) -> Self {
        DecorError::Schema {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecorError>;
