mod java;

use std::sync::Arc;

use crate::config::NormalizerConfig;
use crate::converter::{Converter, GoCoverprofileConverter};
use crate::detection::{self, ReportFormat, SourceLanguage};
use crate::error::NormalizeError;
use crate::fs::{LocalFs, SourceTree};
use crate::lcov;
use crate::warning::{LogSink, NormalizationWarning, WarningSink};

/// Rewrites the `SF:` records of coverage reports to build-relative paths.
///
/// Configuration and collaborators are fixed at construction, so one
/// normalizer can be shared between threads and reused across reports.
pub struct Normalizer {
    config: NormalizerConfig,
    source_tree: Arc<dyn SourceTree>,
    warning_sink: Arc<dyn WarningSink>,
    converter: Arc<dyn Converter>,
}

impl Normalizer {
    /// Build a normalizer over the local filesystem that logs its warnings.
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            config,
            source_tree: Arc::new(LocalFs),
            warning_sink: Arc::new(LogSink),
            converter: Arc::new(GoCoverprofileConverter),
        }
    }

    pub fn with_source_tree(mut self, source_tree: Arc<dyn SourceTree>) -> Self {
        self.source_tree = source_tree;
        self
    }

    pub fn with_warning_sink(mut self, warning_sink: Arc<dyn WarningSink>) -> Self {
        self.warning_sink = warning_sink;
        self
    }

    /// Replace the converter used for Go coverprofile reports.
    pub fn with_converter(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = converter;
        self
    }

    /// Normalize a whole report.
    ///
    /// Go coverprofiles are converted to LCOV first. Every `SF:` line is
    /// rewritten in place and all other lines are kept verbatim. A report
    /// without any `DA:` or `FNDA:` record normalizes to nothing.
    pub fn normalize<S: AsRef<str>>(&self, report: &[S]) -> Result<Vec<String>, NormalizeError> {
        if report.is_empty() {
            return Ok(Vec::new());
        }

        match detection::detect_report_format(report) {
            ReportFormat::GoCoverprofile => {
                let lines: Vec<&str> = report.iter().map(AsRef::as_ref).collect();
                let converted = self.converter.convert(&lines)?;
                tracing::debug!(
                    input = lines.len(),
                    output = converted.len(),
                    "converted go coverprofile to lcov"
                );
                self.rewrite(&converted)
            }
            ReportFormat::Lcov => self.rewrite(report),
        }
    }

    fn rewrite<S: AsRef<str>>(&self, lines: &[S]) -> Result<Vec<String>, NormalizeError> {
        let mut out = Vec::with_capacity(lines.len());
        let mut has_records = false;

        for line in lines {
            let line = line.as_ref();
            if let Some(name) = lcov::source_file(line) {
                let normalized = self.normalize_source_filename(name)?;
                out.push(lcov::format_source_file(&normalized));
            } else {
                has_records |= lcov::is_hit_record(line);
                out.push(line.to_string());
            }
        }

        if !has_records {
            tracing::debug!("report has no DA/FNDA records, discarding");
            return Ok(Vec::new());
        }
        Ok(out)
    }

    /// Normalize one source file name according to its extension.
    ///
    /// Names without a language rule are returned unchanged.
    pub fn normalize_source_filename(&self, name: &str) -> Result<String, NormalizeError> {
        match detection::detect_language(name) {
            Some(SourceLanguage::Go) => self.normalize_go(name),
            Some(SourceLanguage::Java) => self.normalize_java(name),
            None => Ok(name.to_string()),
        }
    }

    fn normalize_go(&self, name: &str) -> Result<String, NormalizeError> {
        let importmap = match &self.config.go_importmap {
            Some(map) if !map.is_empty() => map,
            _ => return Err(NormalizeError::MissingGoImportmap),
        };
        Ok(importmap.rewrite(name).unwrap_or_else(|| name.to_string()))
    }

    pub(crate) fn report_warning(&self, warning: NormalizationWarning) {
        self.warning_sink.warn(&warning);
    }
}
