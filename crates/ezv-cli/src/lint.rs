//! # Lint Subcommand
//!
//! Loads and compiles a rule document without any data, reporting whether
//! the resulting schema is sound. Top-level fields are classified with the
//! configured virtual prefix; `max_depth` only applies while walking data
//! and has no effect here.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ezv_core::{EngineOptions, Schema};
use ezv_rules::load_document;

/// Arguments for the `ezv lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Rule document (YAML or JSON) to check.
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,
}

/// Execute the lint subcommand, printing to stdout.
///
/// Returns exit code: 0 when the document loads, compiles and passes the
/// schema checks, 1 otherwise.
pub fn run_lint(args: &LintArgs, options: &EngineOptions) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    lint_to(args, options, &mut out)
}

/// Same as [`run_lint`], writing the report to `out`.
pub fn lint_to(args: &LintArgs, options: &EngineOptions, out: &mut impl Write) -> Result<u8> {
    let path = args.rules.display();
    let schema = match load_document(&args.rules).and_then(|doc| doc.compile()) {
        Ok(schema) => schema,
        Err(e) => {
            writeln!(out, "FAIL {path}: {e}")?;
            return Ok(1);
        }
    };

    if let Err(e) = schema.check() {
        writeln!(out, "FAIL {path}: {e}")?;
        return Ok(1);
    }

    match &schema {
        Schema::Fields(map) => {
            let virtual_fields = map.iter().filter(|(name, _)| options.is_virtual(name)).count();
            writeln!(
                out,
                "OK {path}: {} field(s), {virtual_fields} virtual",
                map.len()
            )?
        }
        Schema::Pipeline(pipeline) => {
            writeln!(out, "OK {path}: pipeline of {} rule(s)", pipeline.len())?
        }
    }
    Ok(0)
}
