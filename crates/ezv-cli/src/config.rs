//! # Engine Configuration
//!
//! Builds [`EngineOptions`] from an optional YAML/JSON configuration file
//! and command-line overrides. Unset keys keep their defaults:
//!
//! ```yaml
//! max_depth: 32
//! virtual_prefix: "__"
//! ```

use std::path::Path;

use anyhow::{Context, Result};

use ezv_core::EngineOptions;
use ezv_rules::load_value;

/// Resolve engine options. `max_depth` overrides the file when given.
pub fn resolve_options(config: Option<&Path>, max_depth: Option<usize>) -> Result<EngineOptions> {
    let mut options = match config {
        Some(path) => {
            let value = load_value(path).context("failed to load configuration file")?;
            serde_json::from_value(value)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
        }
        None => EngineOptions::default(),
    };

    if let Some(depth) = max_depth {
        options.max_depth = depth;
    }

    tracing::debug!(
        max_depth = options.max_depth,
        virtual_prefix = %options.virtual_prefix,
        "resolved engine options"
    );
    Ok(options)
}
