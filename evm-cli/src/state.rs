use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$EVM_HOME`, or `~/.evm`.
pub fn evm_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("EVM_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set (or set EVM_HOME)")?;
    Ok(PathBuf::from(home).join(".evm"))
}

pub fn ensure_evm_home() -> Result<PathBuf> {
    let dir = evm_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Default task file used when `--tasks` is not given.
pub fn default_tasks_path() -> Result<PathBuf> {
    Ok(evm_home()?.join("tasks.json"))
}

/// `--tasks` if given, otherwise the default task file.
pub fn resolve_tasks_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(p) => Ok(p),
        None => default_tasks_path(),
    }
}
