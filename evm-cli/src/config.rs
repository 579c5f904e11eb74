use anyhow::{bail, Context, Result};
use evm_core::{RagThresholds, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_evm_home, evm_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rag: RagSection,
    pub trend: TrendSection,
    pub calendar: CalendarSection,
}

/// Thresholds per index; SPI and CPI can be banded differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSection {
    pub schedule: RagThresholds,
    pub cost: RagThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendSection {
    pub days: u32,
}

impl Default for TrendSection {
    fn default() -> Self {
        Self {
            days: DEFAULT_TREND_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    /// IANA zone used to anchor calendar dates (file cells, `--as-of 2024-02-11`).
    pub timezone: String,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl Config {
    /// Apply `--good` / `--warning` to both indices.
    pub fn override_thresholds(&mut self, good: Option<f64>, warning: Option<f64>) {
        for t in [&mut self.rag.schedule, &mut self.rag.cost] {
            if let Some(g) = good {
                *t = t.with_good(g);
            }
            if let Some(w) = warning {
                *t = t.with_warning(w);
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(evm_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    evm_core::time::parse_tz(&cfg.calendar.timezone)
        .with_context(|| format!("calendar.timezone in {}", p.display()))?;
    if cfg.trend.days > MAX_TREND_DAYS {
        bail!(
            "trend.days in {} is {}; the limit is {MAX_TREND_DAYS}",
            p.display(),
            cfg.trend.days
        );
    }
    Ok(cfg)
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    ensure_evm_home()?;
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.trend.days, 30);
        assert_eq!(cfg.rag.cost, RagThresholds::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[rag.cost]\ngood = 1.05\nwarning = 0.95\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.rag.cost.good, 1.05);
        assert_eq!(cfg.rag.schedule, RagThresholds::default());
        assert_eq!(cfg.calendar.timezone, "UTC");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.trend.days = 14;
        cfg.calendar.timezone = "America/Chicago".to_string();
        save_config_to(&p, &cfg).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_bad_timezone_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[calendar]\ntimezone = \"Nowhere/Special\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn test_oversized_trend_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[trend]\ndays = 4000000000\n").unwrap();
        let err = load_config_from(&p).unwrap_err();
        assert!(format!("{err:#}").contains("trend.days"), "{err:#}");
    }

    #[test]
    fn test_threshold_overrides() {
        let mut cfg = Config::default();
        cfg.override_thresholds(None, Some(0.8));
        assert_eq!(cfg.rag.schedule.good, 1.0);
        assert_eq!(cfg.rag.schedule.warning, 0.8);
        assert_eq!(cfg.rag.cost.warning, 0.8);
    }
}
