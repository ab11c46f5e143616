//! # Rule Document Errors

use thiserror::Error;

/// Failure to load or compile a rule document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    Load {
        /// Path of the file that failed to load.
        path: String,
        /// Reason the file could not be loaded.
        reason: String,
    },

    /// A `pattern` rule holds an invalid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The rejected expression.
        pattern: String,
        /// Compilation error from the regex engine.
        #[source]
        source: regex::Error,
    },
}
