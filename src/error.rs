use std::path::PathBuf;

/// Errors that can occur while normalizing a coverage report.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("cannot normalize *.go source file names since no go_importmap was provided")]
    MissingGoImportmap,

    #[error("cannot normalize *.java source file names since no java_paths was provided")]
    MissingJavaPaths,

    #[error(
        "cannot resolve {filename} against the workspace fallback since dest_dir and workspace_name were not both provided"
    )]
    MissingJavaFallback { filename: String },

    #[error("{filename} can match at least two files: {first} and {second}")]
    AmbiguousSource {
        filename: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{filename} does not belong to any java_path")]
    UnresolvedSource { filename: String },

    #[error("invalid go_importmap: {reason}")]
    InvalidImportmap { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NormalizeError {
    /// True for errors caused by incomplete normalizer configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingGoImportmap
                | Self::MissingJavaPaths
                | Self::MissingJavaFallback { .. }
                | Self::InvalidImportmap { .. }
        )
    }
}
