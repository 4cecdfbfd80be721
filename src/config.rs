use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub(crate) const DB_VAR: &str = "SPENDTRAIL_DB";
pub(crate) const GAZETTEER_VAR: &str = "SPENDTRAIL_GAZETTEER";
pub(crate) const WINDOW_VAR: &str = "SPENDTRAIL_WINDOW";

pub(crate) const DEFAULT_WINDOW: i64 = 7;
/// Widest smoothing half-width accepted anywhere.
pub(crate) const MAX_WINDOW: i64 = 90;

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) gazetteer_path: PathBuf,
    pub(crate) window: i64,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let data_dir = data_dir()?;
        Self::resolve(&data_dir, |key| std::env::var(key).ok())
    }

    /// Build from `lookup`, falling back to files under `data_dir`.
    pub(crate) fn resolve<F>(data_dir: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(default))
        };

        let window = match lookup(WINDOW_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let window: i64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{WINDOW_VAR} must be a whole number, got '{raw}'"))?;
                check_window(window, WINDOW_VAR)?
            }
            None => DEFAULT_WINDOW,
        };

        Ok(Self {
            db_path: path_or(DB_VAR, "spendtrail.db"),
            gazetteer_path: path_or(GAZETTEER_VAR, "suburbs.csv"),
            window,
        })
    }
}

/// `window` must lie in `0..=MAX_WINDOW`; `source` names where it came from.
pub(crate) fn check_window(window: i64, source: &str) -> Result<i64> {
    if window < 0 {
        anyhow::bail!("{source} must not be negative, got {window}");
    }
    if window > MAX_WINDOW {
        anyhow::bail!("{source} must be at most {MAX_WINDOW}, got {window}");
    }
    Ok(window)
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendtrail", "Spendtrail")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
