use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use covnorm::{ImportMap, NormalizeError, Normalizer, NormalizerConfig};

/// Normalize source file paths in LCOV and Go coverprofile reports.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Coverage reports. Omit to read from stdin.
    #[arg()]
    files: Vec<PathBuf>,

    /// Write output to a file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Go import path rewrite, applied in the order given. Repeatable.
    #[arg(long = "go-importmap", value_name = "PREFIX=REPLACEMENT")]
    go_importmap: Vec<String>,

    /// JSON object of Go import path prefixes to replacements, read before
    /// any --go-importmap entries.
    #[arg(long, value_name = "PATH")]
    go_importmap_file: Option<PathBuf>,

    /// Java source root, searched in the order given. Repeatable.
    #[arg(long = "java-path", value_name = "DIR")]
    java_paths: Vec<PathBuf>,

    /// Workspace directory name under --dest-dir used as the Java fallback.
    #[arg(long, value_name = "NAME")]
    workspace_name: Option<String>,

    /// Directory that resolved Java paths are made relative to.
    #[arg(long, value_name = "DIR")]
    dest_dir: Option<PathBuf>,

    /// Fail on ambiguous or unresolvable Java paths instead of warning.
    #[arg(long)]
    strict: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn build_importmap(cli: &Cli) -> Result<Option<ImportMap>, NormalizeError> {
    let mut map = match &cli.go_importmap_file {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                NormalizeError::InvalidImportmap {
                    reason: format!("{}: {e}", path.display()),
                }
            })?;
            ImportMap::from_json_str(&json)?
        }
        None => ImportMap::new(),
    };
    for entry in &cli.go_importmap {
        map.push_entry(entry)?;
    }
    Ok((!map.is_empty()).then_some(map))
}

fn build_config(cli: &Cli) -> Result<NormalizerConfig, NormalizeError> {
    Ok(NormalizerConfig {
        go_importmap: build_importmap(cli)?,
        java_paths: (!cli.java_paths.is_empty()).then(|| cli.java_paths.clone()),
        workspace_name: cli.workspace_name.clone(),
        dest_dir: cli.dest_dir.clone(),
        strict: cli.strict,
    })
}

fn run(cli: Cli) -> Result<ExitCode, ExitCode> {
    let config = build_config(&cli).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(2)
    })?;
    let normalizer = Normalizer::new(config);

    let mut output_buf = String::new();
    let mut had_error = false;

    if cli.files.is_empty() {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data).map_err(|e| {
            eprintln!("error: stdin: {e}");
            ExitCode::from(1)
        })?;

        match covnorm::normalize_bytes(&data, &normalizer) {
            Ok(normalized) => output_buf.push_str(&normalized),
            Err(e) => {
                eprintln!("error: stdin: {e}");
                return Err(ExitCode::from(1));
            }
        }
    } else {
        for path in &cli.files {
            tracing::debug!(path = %path.display(), "normalizing");
            match covnorm::normalize_file(path, &normalizer) {
                Ok(normalized) => output_buf.push_str(&normalized),
                Err(e) => {
                    eprintln!("error: {}: {e}", path.display());
                    had_error = true;
                }
            }
        }
    }

    if let Some(ref out_path) = cli.output {
        std::fs::write(out_path, &output_buf).map_err(|e| {
            eprintln!("error: {}: {e}", out_path.display());
            ExitCode::from(1)
        })?;
    } else {
        io::stdout().write_all(output_buf.as_bytes()).map_err(|e| {
            eprintln!("error: stdout: {e}");
            ExitCode::from(1)
        })?;
    }

    if had_error {
        Err(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(code) => code,
    }
}
