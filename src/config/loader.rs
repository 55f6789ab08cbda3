use std::fs;
use std::path::{Path, PathBuf};

use super::ScoringConfig;
use crate::errors::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".powerrank.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a TOML document and validate the resulting config
pub fn parse_and_validate_config(contents: &str) -> Result<ScoringConfig> {
    let config = toml::from_str::<ScoringConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly requested config file; any failure is fatal
pub fn load_config_from_path(path: &Path) -> Result<ScoringConfig> {
    let contents = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let config = parse_and_validate_config(&contents)
        .context(format!("Failed to load {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(path: &Path) -> Option<ScoringConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", path.display(), e);
            None
        }
    }
}

/// `start` and its parents, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search upward from `start` for `.powerrank.toml`, falling back to defaults
pub fn load_config(start: &Path) -> ScoringConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} found after checking {} directories. Using built-in table.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            ScoringConfig::default()
        })
}

/// TOML text for the built-in configuration, used by `powerrank init`
pub fn render_default_config() -> Result<String> {
    let body = toml::to_string_pretty(&ScoringConfig::default())?;
    Ok(format!(
        "# Power Rank scoring configuration\n\
         # Boundaries are descending percentages ending at 0.\n\
         # Metrics without an override use the default multipliers and score 0 below 50%.\n\n{}",
        body
    ))
}
