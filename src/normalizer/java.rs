use std::path::{Path, PathBuf};

use super::Normalizer;
use crate::error::NormalizeError;
use crate::paths;
use crate::warning::{NormalizationWarning, WarningCode};

impl Normalizer {
    /// Resolve a `.java` name against the configured source roots.
    ///
    /// A single matching root yields the path relative to `dest_dir`. With no
    /// matching root the `dest_dir/workspace_name` fallback is returned as is.
    pub(super) fn normalize_java(&self, name: &str) -> Result<String, NormalizeError> {
        let roots = match self.config.java_paths.as_deref() {
            Some(roots) if !roots.is_empty() => roots,
            _ => return Err(NormalizeError::MissingJavaPaths),
        };

        let mut found: Option<PathBuf> = None;
        for root in roots {
            let candidate = root.join(name);
            if !self.source_tree.exists(&candidate)? {
                continue;
            }
            if let Some(first) = found {
                return self.ambiguous(name, first, candidate);
            }
            found = Some(candidate);
        }

        match found {
            Some(full_path) => self.relative_to_dest(&full_path),
            None => self.workspace_fallback(name, roots),
        }
    }

    /// `dest_dir` when set; an empty path counts as unset.
    fn dest_dir(&self) -> Option<&Path> {
        self.config
            .dest_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    fn relative_to_dest(&self, full_path: &Path) -> Result<String, NormalizeError> {
        let base = self.dest_dir().unwrap_or(Path::new("."));
        let cwd = if full_path.is_absolute() && base.is_absolute() {
            PathBuf::new()
        } else {
            self.source_tree.current_dir()?
        };
        let relative = paths::relative_path(full_path, base, &cwd);
        Ok(relative.to_string_lossy().into_owned())
    }

    fn workspace_fallback(&self, name: &str, roots: &[PathBuf]) -> Result<String, NormalizeError> {
        let (Some(dest_dir), Some(workspace)) =
            (self.dest_dir(), self.config.workspace_name.as_deref())
        else {
            return Err(NormalizeError::MissingJavaFallback {
                filename: name.to_string(),
            });
        };

        let fallback = dest_dir.join(workspace).join(name);
        if self.source_tree.exists(&fallback)? {
            return Ok(fallback.to_string_lossy().into_owned());
        }

        if self.config.strict {
            return Err(NormalizeError::UnresolvedSource {
                filename: name.to_string(),
            });
        }
        let listed: Vec<String> = roots.iter().map(|r| r.display().to_string()).collect();
        self.report_warning(NormalizationWarning {
            code: WarningCode::UnresolvedSource,
            message: format!(
                "{name} does not belong to any java_path; java_paths: {}",
                listed.join(", ")
            ),
            location: Some(name.to_string()),
        });
        Ok(name.to_string())
    }

    fn ambiguous(
        &self,
        name: &str,
        first: PathBuf,
        second: PathBuf,
    ) -> Result<String, NormalizeError> {
        if self.config.strict {
            return Err(NormalizeError::AmbiguousSource {
                filename: name.to_string(),
                first,
                second,
            });
        }
        self.report_warning(NormalizationWarning {
            code: WarningCode::AmbiguousSource,
            message: format!(
                "{name} can match at least two files: {} and {}: cannot normalize",
                first.display(),
                second.display()
            ),
            location: Some(name.to_string()),
        });
        Ok(name.to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::collections::HashSet;
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::config::NormalizerConfig;
    use crate::fs::SourceTree;
    use crate::warning::MemorySink;

    /// In-memory tree: a fixed set of existing paths and a working directory.
    struct FakeTree {
        files: HashSet<PathBuf>,
        cwd: PathBuf,
    }

    impl FakeTree {
        fn new(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(PathBuf::from).collect(),
                cwd: PathBuf::from("/work"),
            }
        }
    }

    impl SourceTree for FakeTree {
        fn exists(&self, path: &Path) -> io::Result<bool> {
            Ok(self.files.contains(path))
        }

        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(self.cwd.clone())
        }
    }

    struct BrokenTree;

    impl SourceTree for BrokenTree {
        fn exists(&self, _path: &Path) -> io::Result<bool> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(PathBuf::from("/"))
        }
    }

    fn config() -> NormalizerConfig {
        NormalizerConfig {
            java_paths: Some(vec![PathBuf::from("/root1"), PathBuf::from("/root2")]),
            workspace_name: Some("ws".to_string()),
            dest_dir: Some(PathBuf::from("/root1")),
            ..Default::default()
        }
    }

    fn normalizer(config: NormalizerConfig, files: &[&str]) -> (Normalizer, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let normalizer = Normalizer::new(config)
            .with_source_tree(Arc::new(FakeTree::new(files)))
            .with_warning_sink(sink.clone());
        (normalizer, sink)
    }

    #[test]
    fn test_java_single_match_relative_to_dest() {
        let (n, sink) = normalizer(config(), &["/root1/pkg/File.java"]);
        assert_eq!(n.normalize_source_filename("pkg/File.java").unwrap(), "pkg/File.java");
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_java_single_match_in_second_root() {
        let (n, _) = normalizer(config(), &["/root2/pkg/File.java"]);
        assert_eq!(
            n.normalize_source_filename("pkg/File.java").unwrap(),
            "../root2/pkg/File.java"
        );
    }

    #[test]
    fn test_java_ambiguous_match_warns_and_keeps_name() {
        let (n, sink) = normalizer(
            config(),
            &["/root1/pkg/File.java", "/root2/pkg/File.java"],
        );
        assert_eq!(n.normalize_source_filename("pkg/File.java").unwrap(), "pkg/File.java");

        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::AmbiguousSource);
        assert_eq!(
            warnings[0].message,
            "pkg/File.java can match at least two files: /root1/pkg/File.java and \
             /root2/pkg/File.java: cannot normalize"
        );
        assert_eq!(warnings[0].location.as_deref(), Some("pkg/File.java"));
    }

    #[test]
    fn test_java_ambiguous_match_strict_fails() {
        let strict = NormalizerConfig {
            strict: true,
            ..config()
        };
        let (n, sink) = normalizer(strict, &["/root1/pkg/File.java", "/root2/pkg/File.java"]);
        let err = n.normalize_source_filename("pkg/File.java").unwrap_err();
        assert!(matches!(err, NormalizeError::AmbiguousSource { .. }));
        assert!(!err.is_configuration());
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_java_fallback_returned_unrelativized() {
        let (n, sink) = normalizer(config(), &["/root1/ws/pkg/File.java"]);
        assert_eq!(
            n.normalize_source_filename("pkg/File.java").unwrap(),
            "/root1/ws/pkg/File.java"
        );
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_java_total_miss_warns_and_keeps_name() {
        let (n, sink) = normalizer(config(), &[]);
        assert_eq!(n.normalize_source_filename("pkg/File.java").unwrap(), "pkg/File.java");

        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::UnresolvedSource);
        assert_eq!(
            warnings[0].to_string(),
            "NORMALIZATION WARNING: pkg/File.java does not belong to any java_path; \
             java_paths: /root1, /root2"
        );
    }

    #[test]
    fn test_java_total_miss_strict_fails() {
        let strict = NormalizerConfig {
            strict: true,
            ..config()
        };
        let (n, _) = normalizer(strict, &[]);
        assert!(matches!(
            n.normalize_source_filename("pkg/File.java"),
            Err(NormalizeError::UnresolvedSource { .. })
        ));
    }

    #[test]
    fn test_java_without_paths_fails() {
        let (n, _) = normalizer(NormalizerConfig::default(), &["/root1/pkg/File.java"]);
        let err = n.normalize_source_filename("pkg/File.java").unwrap_err();
        assert!(matches!(err, NormalizeError::MissingJavaPaths));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_java_empty_paths_counts_as_missing() {
        let empty = NormalizerConfig {
            java_paths: Some(Vec::new()),
            ..config()
        };
        let (n, _) = normalizer(empty, &[]);
        assert!(matches!(
            n.normalize_source_filename("pkg/File.java"),
            Err(NormalizeError::MissingJavaPaths)
        ));
    }

    #[test]
    fn test_java_fallback_needs_dest_and_workspace() {
        let partial = NormalizerConfig {
            workspace_name: None,
            ..config()
        };
        let (n, _) = normalizer(partial, &[]);
        assert!(matches!(
            n.normalize_source_filename("pkg/File.java"),
            Err(NormalizeError::MissingJavaFallback { .. })
        ));
    }

    #[test]
    fn test_java_single_match_without_dest_uses_cwd() {
        let no_dest = NormalizerConfig {
            dest_dir: None,
            ..config()
        };
        let (n, _) = normalizer(no_dest, &["/root1/pkg/File.java"]);
        assert_eq!(
            n.normalize_source_filename("pkg/File.java").unwrap(),
            "../root1/pkg/File.java"
        );
    }

    #[test]
    fn test_java_empty_dest_treated_as_unset() {
        let empty_dest = NormalizerConfig {
            dest_dir: Some(PathBuf::new()),
            ..config()
        };
        let (n, _) = normalizer(empty_dest, &["/root1/pkg/File.java"]);
        assert_eq!(
            n.normalize_source_filename("pkg/File.java").unwrap(),
            "../root1/pkg/File.java"
        );
    }

    #[test]
    fn test_java_empty_dest_has_no_fallback() {
        let empty_dest = NormalizerConfig {
            dest_dir: Some(PathBuf::new()),
            ..config()
        };
        let (n, _) = normalizer(empty_dest, &["ws/pkg/File.java"]);
        assert!(matches!(
            n.normalize_source_filename("pkg/File.java"),
            Err(NormalizeError::MissingJavaFallback { .. })
        ));
    }

    #[test]
    fn test_java_relative_roots_resolved_against_cwd() {
        let relative = NormalizerConfig {
            java_paths: Some(vec![PathBuf::from("src/main/java")]),
            dest_dir: Some(PathBuf::from("/work")),
            ..config()
        };
        let (n, _) = normalizer(relative, &["src/main/java/pkg/File.java"]);
        assert_eq!(
            n.normalize_source_filename("pkg/File.java").unwrap(),
            "src/main/java/pkg/File.java"
        );
    }

    #[test]
    fn test_java_filesystem_error_propagates() {
        let n = Normalizer::new(config()).with_source_tree(Arc::new(BrokenTree));
        assert!(matches!(
            n.normalize_source_filename("pkg/File.java"),
            Err(NormalizeError::Io(_))
        ));
    }

    #[test]
    fn test_java_warning_does_not_abort_report() {
        let (n, sink) = normalizer(config(), &["/root1/pkg/Good.java"]);
        let report = [
            "SF:pkg/Missing.java",
            "DA:1,0",
            "end_of_record",
            "SF:pkg/Good.java",
            "DA:2,1",
            "end_of_record",
        ];
        let out = n.normalize(&report).unwrap();
        assert_eq!(out[0], "SF:pkg/Missing.java");
        assert_eq!(out[3], "SF:pkg/Good.java");
        assert_eq!(sink.warnings().len(), 1);
    }
}
