//! Response pacing.
//!
//! The dialogue engine only tags a reply with a [`PacingTier`]; the transport
//! decides whether and how long to wait before sending it.

use adam_core::config::PacingConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingTier {
    Quick,
    #[default]
    Normal,
    Dramatic,
}

#[derive(Debug, Clone)]
pub struct Pacer {
    enabled: bool,
    quick: RangeInclusive<u64>,
    normal: RangeInclusive<u64>,
    dramatic: RangeInclusive<u64>,
}

fn ordered([a, b]: [u64; 2]) -> RangeInclusive<u64> {
    a.min(b)..=a.max(b)
}

impl Pacer {
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            enabled: config.enabled,
            quick: ordered(config.quick_ms),
            normal: ordered(config.normal_ms),
            dramatic: ordered(config.dramatic_ms),
        }
    }

    /// A pacer that never waits.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(&PacingConfig::default())
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn range(&self, tier: PacingTier) -> &RangeInclusive<u64> {
        match tier {
            PacingTier::Quick => &self.quick,
            PacingTier::Normal => &self.normal,
            PacingTier::Dramatic => &self.dramatic,
        }
    }

    /// Randomized delay for `tier`; zero when disabled.
    pub fn delay_for(&self, tier: PacingTier) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.range(tier).clone());
        Duration::from_millis(ms)
    }

    pub async fn pause(&self, tier: PacingTier) {
        let delay = self.delay_for(tier);
        if !delay.is_zero() {
            tracing::trace!("Pacing {:?} for {}ms", tier, delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(&PacingConfig::default())
    }
}
