/// Header that opens every Go coverprofile (`mode: set`, `mode: count`, ...).
pub const COVERPROFILE_HEADER: &str = "mode: ";

/// On-disk layout of a coverage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Lcov,
    GoCoverprofile,
}

/// Source languages with a filename normalization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Go,
    Java,
}

/// Detect the report format from its first line.
///
/// Only the coverprofile header is recognized; everything else is treated as
/// LCOV. No check is made that the remaining lines match the detected format.
pub fn detect_report_format<S: AsRef<str>>(lines: &[S]) -> ReportFormat {
    match lines.first() {
        Some(first) if first.as_ref().starts_with(COVERPROFILE_HEADER) => {
            ReportFormat::GoCoverprofile
        }
        _ => ReportFormat::Lcov,
    }
}

/// Detect the source language of a file named in an `SF:` record.
///
/// The match is on the literal suffix, so `Foo.JAVA` has no rule.
pub fn detect_language(filename: &str) -> Option<SourceLanguage> {
    if filename.ends_with(".go") {
        Some(SourceLanguage::Go)
    } else if filename.ends_with(".java") {
        Some(SourceLanguage::Java)
    } else {
        None
    }
}
