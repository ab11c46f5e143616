//! # ezv-cli: Command-Line Interface
//!
//! Provides the `ezv` binary for validating JSON/YAML data files against
//! rule documents.
//!
//! ## Subcommands
//!
//! - `ezv check --rules RULES DATA...`: validate data files and report
//!   field errors as text or JSON.
//! - `ezv lint RULES`: check that a rule document compiles into a sound
//!   schema.
//!
//! ## Exit Codes
//!
//! `0` valid, `1` validation failures, `2` operational error.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `ezv-core` and `ezv-rules`; no validation logic
//!   lives here.

pub mod check;
pub mod config;
pub mod lint;
