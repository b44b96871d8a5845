//! CLI command implementations

pub mod analyze;
pub mod categorize;
pub mod ingest;
pub mod rules;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use spendlens_core::services::init_tracing;
use spendlens_core::SpendlensContext;

/// Get the spendlens directory from environment or default
pub fn get_spendlens_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDLENS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".spendlens"))
        .ok_or_else(|| anyhow!("Could not find home directory"))
}

/// Load config and build a context, with tracing installed
pub fn get_context() -> Result<SpendlensContext> {
    let spendlens_dir = get_spendlens_dir()?;

    let ctx = SpendlensContext::new(&spendlens_dir)
        .with_context(|| format!("Failed to load settings from {:?}", spendlens_dir))?;
    init_tracing(&ctx.config.log_level);

    Ok(ctx)
}

/// Declared type for a file: explicit flag, else the extension
pub fn declared_type(path: &Path, explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
        })
        .unwrap_or_default()
}
