//! Anti-repeat memory for phrase pools.
//!
//! Each pool name keeps a ring of the most recently served indices. A draw is
//! uniform over the indices outside that ring; once every index has been
//! served the draw falls back to the whole pool minus the last index.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Upper bound on the per-pool recency window.
pub const MAX_WINDOW: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolHistory {
    recent: HashMap<String, VecDeque<usize>>,
}

impl PoolHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw an index in `0..pool_len` for `pool`, avoiding recent repeats.
    ///
    /// Returns 0 for an empty or single-entry pool.
    pub fn pick<R: Rng + ?Sized>(&mut self, pool: &str, pool_len: usize, rng: &mut R) -> usize {
        if pool_len <= 1 {
            return 0;
        }
        let window = pool_len.min(MAX_WINDOW);
        let ring = self.recent.entry(pool.to_string()).or_default();

        let fresh: Vec<usize> = (0..pool_len).filter(|i| !ring.contains(i)).collect();
        let choice = if fresh.is_empty() {
            let last = ring.back().copied();
            let rest: Vec<usize> = (0..pool_len).filter(|i| Some(*i) != last).collect();
            rest[rng.gen_range(0..rest.len())]
        } else {
            fresh[rng.gen_range(0..fresh.len())]
        };

        ring.retain(|i| *i != choice);
        ring.push_back(choice);
        while ring.len() > window {
            ring.pop_front();
        }
        choice
    }

    /// Indices remembered for `pool`, oldest first.
    pub fn recent(&self, pool: &str) -> Vec<usize> {
        self.recent
            .get(pool)
            .map(|ring| ring.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_pass_covers_every_index() {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen: Vec<usize> = (0..5).map(|_| history.pick("opening", 5, &mut rng)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..40 {
            history.pick("big", 20, &mut rng);
        }
        assert_eq!(history.recent("big").len(), MAX_WINDOW);

        for _ in 0..10 {
            history.pick("small", 3, &mut rng);
        }
        assert_eq!(history.recent("small").len(), 3);
    }

    #[test]
    fn test_no_consecutive_repeat_after_exhaustion() {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut last = history.pick("pair", 2, &mut rng);
        for _ in 0..50 {
            let next = history.pick("pair", 2, &mut rng);
            assert_ne!(next, last);
            last = next;
        }
    }

    #[test]
    fn test_single_entry_pool() {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(history.pick("solo", 1, &mut rng), 0);
        assert_eq!(history.pick("solo", 1, &mut rng), 0);
        assert!(history.is_empty());
    }
}
