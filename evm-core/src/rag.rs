//! Red/amber/green classification of performance indices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered worst to best, so `Red < Amber < Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl fmt::Display for RagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Amber => write!(f, "amber"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// Floors for green (`good`) and amber (`warning`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagThresholds {
    pub good: f64,
    pub warning: f64,
}

impl Default for RagThresholds {
    fn default() -> Self {
        Self {
            good: 1.0,
            warning: 0.9,
        }
    }
}

impl RagThresholds {
    pub fn with_good(mut self, good: f64) -> Self {
        self.good = good;
        self
    }

    pub fn with_warning(mut self, warning: f64) -> Self {
        self.warning = warning;
        self
    }
}

/// Classify an index. Total: zero, negatives and NaN all land on red.
pub fn classify(value: f64, thresholds: RagThresholds) -> RagStatus {
    if value >= thresholds.good {
        RagStatus::Green
    } else if value >= thresholds.warning {
        RagStatus::Amber
    } else {
        RagStatus::Red
    }
}

/// Which index a caption describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Schedule,
    Cost,
}

impl IndexKind {
    pub fn abbrev(&self) -> &'static str {
        match self {
            IndexKind::Schedule => "SPI",
            IndexKind::Cost => "CPI",
        }
    }

    /// Gauge heading.
    pub fn label(&self) -> &'static str {
        match self {
            IndexKind::Schedule => "Schedule Performance Index (SPI)",
            IndexKind::Cost => "Cost Performance Index (CPI)",
        }
    }

    /// Gauge caption, driven by the RAG status.
    pub fn status_caption(&self, status: RagStatus) -> &'static str {
        match (self, status) {
            (IndexKind::Schedule, RagStatus::Green) => "Ahead of schedule",
            (IndexKind::Schedule, RagStatus::Amber) => "On schedule",
            (IndexKind::Schedule, RagStatus::Red) => "Behind schedule",
            (IndexKind::Cost, RagStatus::Green) => "Under budget",
            (IndexKind::Cost, RagStatus::Amber) => "On budget",
            (IndexKind::Cost, RagStatus::Red) => "Over budget",
        }
    }

    /// Indicator note, driven by the raw value against 1.0.
    pub fn value_note(&self, value: f64) -> &'static str {
        match self {
            IndexKind::Schedule if value > 1.0 => "Ahead of schedule",
            IndexKind::Schedule if value < 1.0 => "Behind schedule",
            IndexKind::Schedule => "On schedule",
            IndexKind::Cost if value > 1.0 => "Under budget",
            IndexKind::Cost if value < 1.0 => "Over budget",
            IndexKind::Cost => "On budget",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let t = RagThresholds::default();
        assert_eq!(classify(1.0, t), RagStatus::Green);
        assert_eq!(classify(1.25, t), RagStatus::Green);
        assert_eq!(classify(0.95, t), RagStatus::Amber);
        assert_eq!(classify(0.9, t), RagStatus::Amber);
        assert_eq!(classify(0.8333, t), RagStatus::Red);
        assert_eq!(classify(0.0, t), RagStatus::Red);
        assert_eq!(classify(-3.0, t), RagStatus::Red);
        assert_eq!(classify(f64::NAN, t), RagStatus::Red);
    }

    #[test]
    fn test_override_one_threshold() {
        let t = RagThresholds::default().with_warning(0.5);
        assert_eq!(t.good, 1.0);
        assert_eq!(classify(0.6, t), RagStatus::Amber);

        let t = RagThresholds::default().with_good(1.1);
        assert_eq!(t.warning, 0.9);
        assert_eq!(classify(1.05, t), RagStatus::Amber);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let t = RagThresholds::default();
        let values: Vec<f64> = (-20..=30).map(|i| i as f64 * 0.05).collect();
        for a in &values {
            for b in &values {
                if a >= b {
                    assert!(classify(*a, t) >= classify(*b, t), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_status_order_and_display() {
        assert!(RagStatus::Red < RagStatus::Amber);
        assert!(RagStatus::Amber < RagStatus::Green);
        assert_eq!(RagStatus::Amber.to_string(), "amber");
        assert_eq!(serde_json::to_string(&RagStatus::Green).unwrap(), "\"green\"");
    }

    #[test]
    fn test_captions() {
        assert_eq!(IndexKind::Schedule.status_caption(RagStatus::Green), "Ahead of schedule");
        assert_eq!(IndexKind::Cost.status_caption(RagStatus::Red), "Over budget");
        assert_eq!(IndexKind::Cost.value_note(1.0), "On budget");
        assert_eq!(IndexKind::Schedule.value_note(0.2), "Behind schedule");
        assert_eq!(IndexKind::Cost.value_note(1.2), "Under budget");
    }

    #[test]
    fn test_headings() {
        assert_eq!(IndexKind::Schedule.abbrev(), "SPI");
        assert_eq!(IndexKind::Cost.label(), "Cost Performance Index (CPI)");
    }
}
