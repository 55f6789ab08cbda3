pub mod init;
pub mod plan;
pub mod score;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{self, ScoringConfig};

/// Explicit `--config` is strict; otherwise search upward, then fall back to defaults
pub fn resolve_config(explicit: Option<&Path>) -> Result<ScoringConfig> {
    match explicit {
        Some(path) => Ok(config::load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Ok(config::load_config(&cwd))
        }
    }
}
