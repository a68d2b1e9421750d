use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the application state directory, creating it if needed. Prefers the
/// platform state dir and falls back to the home directory.
pub fn default_app_dir() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::home_dir)
        .context("couldn't resolve a state directory for the application")?;
    let path = base.join("idlewatch");
    std::fs::create_dir_all(&path)
        .with_context(|| format!("couldn't create application directory {}", path.display()))?;
    Ok(path)
}
