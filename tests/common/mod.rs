use covnorm::{ImportMap, Normalizer, NormalizerConfig};

/// Normalizer with the import map used by the Go fixtures.
#[allow(dead_code)]
pub fn go_normalizer() -> Normalizer {
    Normalizer::new(NormalizerConfig {
        go_importmap: Some(ImportMap::from_pairs([(
            "github.com/example/project/",
            "project/",
        )])),
        ..Default::default()
    })
}

/// Split text into lines, dropping trailing whitespace, for golden comparison.
#[allow(dead_code)]
pub fn lines(s: &str) -> Vec<String> {
    s.lines().map(|l| l.trim_end().to_string()).collect()
}
