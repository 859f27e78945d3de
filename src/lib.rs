pub mod config;
pub mod converter;
pub mod detection;
pub mod error;
pub mod fs;
pub mod lcov;
pub mod normalizer;
pub mod paths;
pub mod warning;

pub use config::{ImportMap, NormalizerConfig};
pub use converter::{Converter, GoCoverprofileConverter};
pub use error::NormalizeError;
pub use fs::{LocalFs, SourceTree};
pub use normalizer::Normalizer;
pub use warning::{LogSink, MemorySink, NormalizationWarning, WarningCode, WarningSink};

use std::path::Path;

/// Normalize the coverage report stored at `path`.
///
/// The bytes are decoded with [`converter::decode_text`]; a decoding
/// fallback is reported to the normalizer's warning sink.
pub fn normalize_file(
    path: impl AsRef<Path>,
    normalizer: &Normalizer,
) -> Result<String, NormalizeError> {
    let data = std::fs::read(path.as_ref())?;
    decode_and_normalize(&data, Some(path.as_ref().display().to_string()), normalizer)
}

/// Normalize raw report bytes, e.g. read from stdin.
///
/// Decoding works as in [`normalize_file`]; a fallback warning goes to the
/// normalizer's warning sink without a location.
pub fn normalize_bytes(data: &[u8], normalizer: &Normalizer) -> Result<String, NormalizeError> {
    decode_and_normalize(data, None, normalizer)
}

fn decode_and_normalize(
    data: &[u8],
    location: Option<String>,
    normalizer: &Normalizer,
) -> Result<String, NormalizeError> {
    let (text, warning) = converter::decode_text(data);
    if let Some(mut warning) = warning {
        warning.location = location;
        normalizer.report_warning(warning);
    }
    normalize_str(&text, normalizer)
}

/// Normalize a report held in memory.
///
/// Output lines are joined with `\n` and end with a newline; a report that
/// normalizes to nothing yields an empty string.
pub fn normalize_str(text: &str, normalizer: &Normalizer) -> Result<String, NormalizeError> {
    let lines: Vec<&str> = text.lines().collect();
    let normalized = normalizer.normalize(&lines)?;

    let mut out = String::new();
    for line in &normalized {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}
