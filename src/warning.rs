use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Tag prefixed to every rendered warning.
pub const WARNING_TAG: &str = "NORMALIZATION WARNING:";

/// Categories for recoverable normalization issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningCode {
    /// More than one Java source root contains the file.
    AmbiguousSource,
    /// No Java source root nor the workspace fallback contains the file.
    UnresolvedSource,
    /// Input was not UTF-8 and had to be decoded with a fallback encoding.
    NonUtf8Input,
}

/// A recoverable issue encountered during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationWarning {
    pub code: WarningCode,
    pub message: String,
    /// The `SF:` file name the warning is about, if any.
    pub location: Option<String>,
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{WARNING_TAG} {}", self.message)
    }
}

/// Receiver for non-fatal warnings raised while normalizing.
pub trait WarningSink: Send + Sync {
    fn warn(&self, warning: &NormalizationWarning);
}

/// Default sink: emits each warning as a `tracing` event at `WARN` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, warning: &NormalizationWarning) {
        tracing::warn!(code = ?warning.code, "{warning}");
    }
}

/// Sink that keeps every warning in memory, for callers that report them
/// on their own terms.
#[derive(Debug, Default)]
pub struct MemorySink {
    warnings: Mutex<Vec<NormalizationWarning>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings received so far.
    pub fn warnings(&self) -> Vec<NormalizationWarning> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl WarningSink for MemorySink {
    fn warn(&self, warning: &NormalizationWarning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}
