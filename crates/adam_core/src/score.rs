//! Two-axis narrative score and the ending it selects.

use serde::{Deserialize, Serialize};

/// Accumulated narrative weights. Only grows; cleared by a session reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub efficiency: i64,
    pub integrity: i64,
}

/// Normalized percentage view of [`Scores`]. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSplit {
    pub efficiency_pct: u8,
    pub integrity_pct: u8,
}

impl Scores {
    pub fn bump_efficiency(&mut self, by: u32) {
        self.efficiency = self.efficiency.saturating_add(i64::from(by));
    }

    pub fn bump_integrity(&mut self, by: u32) {
        self.integrity = self.integrity.saturating_add(i64::from(by));
    }

    /// `total = max(1, |eff| + |integ|)`, `eff% = round((lean + total) / 2·total · 100)`
    /// where `lean = eff - integ`.
    pub fn split(&self) -> ScoreSplit {
        let eff = self.efficiency as f64;
        let integ = self.integrity as f64;
        let total = (eff.abs() + integ.abs()).max(1.0);
        let lean = eff - integ;
        let pct = (((lean + total) / (2.0 * total)) * 100.0).round().clamp(0.0, 100.0) as u8;
        ScoreSplit {
            efficiency_pct: pct,
            integrity_pct: 100 - pct,
        }
    }
}

/// Canned ending chosen at the close of a creator-mode cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Archive,
    Efficiency,
    Integrity,
    Balanced,
}

impl Ending {
    pub fn select(split: ScoreSplit, archive_requested: bool) -> Self {
        if archive_requested {
            Ending::Archive
        } else if split.efficiency_pct >= 60 {
            Ending::Efficiency
        } else if split.efficiency_pct <= 40 {
            Ending::Integrity
        } else {
            Ending::Balanced
        }
    }
}
