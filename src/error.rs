use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stackgen operations
#[derive(Error, Debug)]
pub enum StackgenError {
    /// IO error when writing or reading the bundle
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Template path escapes the output root
    #[error("Path traversal detected (template path leaves the output directory): {path}")]
    PathTraversal { path: PathBuf },

    /// Archive would be written inside the directory it archives
    #[error("Archive {archive} must not be inside the output directory {root}")]
    ArchiveInsideOutput { archive: PathBuf, root: PathBuf },

    /// `--set` argument without a `=` separator
    #[error("Invalid placeholder binding '{binding}', expected TOKEN=VALUE")]
    InvalidBinding { binding: String },

    /// Bundle manifest could not be found
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Consistency check failed in strict mode
    #[error("Bundle is inconsistent:\n  {}", .findings.join("\n  "))]
    Inconsistent { findings: Vec<String> },

    /// Log filter or subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// `WalkDir` error when traversing the output directory
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Zip archive error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON manifest error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackgenError>;
