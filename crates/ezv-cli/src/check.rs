//! # Check Subcommand
//!
//! Validates data files against a rule document and prints a report.
//!
//! Directories given as data paths are searched recursively for `.json`,
//! `.yaml` and `.yml` files, visited in sorted order.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use ezv_core::{Engine, EngineOptions, FieldErrors, Schema, TracingObserver};
use ezv_rules::{load_document, load_value};

/// Arguments for the `ezv check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule document (YAML or JSON) describing the expected shape.
    #[arg(long, value_name = "PATH")]
    pub rules: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Data files or directories to validate.
    #[arg(value_name = "DATA", required = true)]
    pub data: Vec<PathBuf>,
}

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `PASS`/`FAIL` lines followed by one line per error.
    Text,
    /// A JSON array of `{ file, errors }` objects.
    Json,
}

/// Validation result for one data file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub errors: FieldErrors,
}

/// Execute the check subcommand, printing to stdout.
///
/// Returns exit code: 0 when every file is valid, 1 when any file has
/// field errors. Operational failures (unreadable files, bad rule
/// documents, misconfigured schemas) are returned as `Err`.
pub fn run_check(args: &CheckArgs, options: &EngineOptions) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    check_to(args, options, &mut out)
}

/// Same as [`run_check`], writing the report to `out`.
pub fn check_to(args: &CheckArgs, options: &EngineOptions, out: &mut impl Write) -> Result<u8> {
    let doc = load_document(&args.rules).context("failed to load rule document")?;
    let schema = doc.compile().context("failed to compile rule document")?;
    schema
        .check()
        .with_context(|| format!("rule document {} is misconfigured", args.rules.display()))?;

    let engine = Engine::new(options.clone()).with_observer(Arc::new(TracingObserver));
    let files = collect_data_files(&args.data)?;
    tracing::info!(files = files.len(), rules = %args.rules.display(), "checking data files");

    let reports = files
        .iter()
        .map(|path| check_file(&engine, &schema, path))
        .collect::<Result<Vec<_>>>()?;

    match args.format {
        OutputFormat::Text => write_text(&reports, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports).context("failed to write report")?;
            writeln!(out)?;
        }
    }

    let failed = reports.iter().filter(|r| !r.errors.is_empty()).count();
    if failed > 0 {
        tracing::info!(failed, total = reports.len(), "validation failures");
        Ok(1)
    } else {
        Ok(0)
    }
}

fn check_file(engine: &Engine, schema: &Schema, path: &Path) -> Result<FileReport> {
    let value = load_value(path)?;
    let errors = engine
        .validate(&value, schema)
        .with_context(|| format!("schema error while validating {}", path.display()))?;
    tracing::debug!(file = %path.display(), errors = errors.len(), "validated file");
    Ok(FileReport {
        file: path.display().to_string(),
        errors,
    })
}

fn write_text(reports: &[FileReport], out: &mut impl Write) -> Result<()> {
    for report in reports {
        if report.errors.is_empty() {
            writeln!(out, "PASS {}", report.file)?;
            continue;
        }
        writeln!(out, "FAIL {}", report.file)?;
        for error in &report.errors {
            writeln!(out, "  {error}")?;
        }
    }
    let failed = reports.iter().filter(|r| !r.errors.is_empty()).count();
    if failed > 0 {
        writeln!(
            out,
            "\n{} file(s) failed validation out of {} total.",
            failed,
            reports.len()
        )?;
    }
    Ok(())
}

/// Expand directories into the data files they contain. Files found under
/// one directory are sorted; explicit paths keep their command-line order.
fn collect_data_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        let mut pending = vec![path.clone()];
        while let Some(dir) = pending.pop() {
            let entries = std::fs::read_dir(&dir)
                .with_context(|| format!("cannot read directory {}", dir.display()))?;
            for entry in entries {
                let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
                let entry_path = entry.path();
                if entry_path.is_dir() {
                    pending.push(entry_path);
                } else if is_data_file(&entry_path) {
                    found.push(entry_path);
                }
            }
        }
        found.sort();
        tracing::debug!(dir = %path.display(), files = found.len(), "expanded data directory");
        files.extend(found);
    }
    Ok(files)
}

fn is_data_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directories_expand_to_sorted_data_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        for name in ["b.json", "a.yaml", "notes.txt", "nested/c.yml"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let files = collect_data_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], "a.yaml");
        assert_eq!(names[1], "b.json");
        assert!(names[2].ends_with("c.yml"));
    }

    #[test]
    fn explicit_files_are_kept_in_order() {
        let files =
            collect_data_files(&[PathBuf::from("z.json"), PathBuf::from("a.json")]).unwrap();
        assert_eq!(files, [PathBuf::from("z.json"), PathBuf::from("a.json")]);
    }
}
