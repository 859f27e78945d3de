pub mod coverprofile;

pub use coverprofile::GoCoverprofileConverter;

use crate::error::NormalizeError;
use crate::warning::{NormalizationWarning, WarningCode};

/// Trait implemented by converters that turn a foreign report format into
/// LCOV lines.
pub trait Converter: Send + Sync {
    /// Convert every line of the report, header included, to LCOV lines.
    fn convert(&self, lines: &[&str]) -> Result<Vec<String>, NormalizeError>;
}

/// Decode raw report bytes into text.
///
/// A byte order mark selects its encoding and is stripped. Without one the
/// data is read as UTF-8, falling back to Windows-1252 with a warning.
pub fn decode_text(data: &[u8]) -> (String, Option<NormalizationWarning>) {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(data) {
        let (text, _) = encoding.decode_without_bom_handling(&data[bom_len..]);
        let warning = (encoding != encoding_rs::UTF_8).then(|| NormalizationWarning {
            code: WarningCode::NonUtf8Input,
            message: format!("input decoded from {}", encoding.name()),
            location: None,
        });
        return (text.into_owned(), warning);
    }

    match std::str::from_utf8(data) {
        Ok(text) => (text.to_string(), None),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(data);
            let warning = NormalizationWarning {
                code: WarningCode::NonUtf8Input,
                message: "input is not valid UTF-8; decoded as windows-1252".to_string(),
                location: None,
            };
            (text.into_owned(), Some(warning))
        }
    }
}
