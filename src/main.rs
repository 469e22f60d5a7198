// src/main.rs

//! The main entry point for the clustergen binary.

use anyhow::{Context, Result};
use clustergen::config::ENV_FILE;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};

fn main() -> Result<()> {
    // Setup logging with compact format and ANSI colors.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .with_ansi(true)
        .init();

    info!("clustergen {} starting", env!("CARGO_PKG_VERSION"));

    let root = resolve_root()?;
    if let Err(e) = clustergen::run(&root) {
        error!("Generation failed: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Resolves the directory the settings file is read from and both outputs
/// are written into: the working directory when it holds a `.env` (the
/// usual case when invoked from a mounted project checkout), otherwise the
/// executable's grandparent directory.
fn resolve_root() -> Result<PathBuf> {
    let cwd = env::current_dir().context("Failed to determine working directory")?;
    if cwd.join(ENV_FILE).exists() {
        return Ok(cwd);
    }
    let exe = env::current_exe().context("Failed to determine executable path")?;
    Ok(exe
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or(cwd))
}
