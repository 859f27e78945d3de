use std::path::PathBuf;

use crate::error::NormalizeError;

/// Ordered Go import-path rewrite table. The first matching prefix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMap {
    entries: Vec<(String, String)>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(prefix, replacement)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a JSON object of `prefix -> replacement`, keeping key order.
    pub fn from_json_str(json: &str) -> Result<Self, NormalizeError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| NormalizeError::InvalidImportmap {
                reason: format!("expected a JSON object of prefix to replacement: {e}"),
            })?;

        let mut map = Self::new();
        for (prefix, value) in object {
            let replacement = value
                .as_str()
                .ok_or_else(|| NormalizeError::InvalidImportmap {
                    reason: format!("replacement for {prefix:?} is not a string"),
                })?;
            map.push(prefix, replacement);
        }
        Ok(map)
    }

    /// Append one `PREFIX=REPLACEMENT` entry.
    ///
    /// The entry splits at the first `=`; the replacement may be empty.
    pub fn push_entry(&mut self, entry: &str) -> Result<(), NormalizeError> {
        match entry.split_once('=') {
            Some((prefix, replacement)) if !prefix.is_empty() => {
                self.push(prefix, replacement);
                Ok(())
            }
            _ => Err(NormalizeError::InvalidImportmap {
                reason: format!("expected PREFIX=REPLACEMENT, got {entry:?}"),
            }),
        }
    }

    pub fn push(&mut self, prefix: impl Into<String>, replacement: impl Into<String>) {
        self.entries.push((prefix.into(), replacement.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrite `name` with the first prefix it starts with, if any.
    pub fn rewrite(&self, name: &str) -> Option<String> {
        self.iter().find_map(|(prefix, replacement)| {
            name.strip_prefix(prefix)
                .map(|rest| format!("{replacement}{rest}"))
        })
    }
}

/// Settings fixed when a [`Normalizer`](crate::Normalizer) is built.
///
/// Every field is optional. A missing field only matters once a source file
/// needing it shows up in a report; an empty import map or root list counts
/// as missing.
#[derive(Debug, Clone, Default)]
pub struct NormalizerConfig {
    /// Rewrite table for `.go` file names.
    pub go_importmap: Option<ImportMap>,
    /// Source roots searched, in order, for `.java` file names.
    pub java_paths: Option<Vec<PathBuf>>,
    /// Workspace directory under `dest_dir` used as the Java fallback root.
    pub workspace_name: Option<String>,
    /// Directory that resolved Java paths are made relative to.
    pub dest_dir: Option<PathBuf>,
    /// Fail on ambiguous or unresolvable Java paths instead of warning.
    pub strict: bool,
}
