//! Property-based tests for adam_core.
//!
//! Uses proptest to verify invariants that must hold for ALL possible inputs,
//! not just hand-picked examples.

use adam_core::intent::{is_activation, is_no, is_yes, parse_option};
use adam_core::{PoolHistory, Scores};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Score split
// ============================================================================

proptest! {
    /// The two percentages always add up to exactly 100.
    #[test]
    fn split_always_sums_to_hundred(eff in 0u32..10_000, integ in 0u32..10_000) {
        let mut scores = Scores::default();
        scores.bump_efficiency(eff);
        scores.bump_integrity(integ);
        let split = scores.split();
        prop_assert_eq!(split.efficiency_pct as u32 + split.integrity_pct as u32, 100);
    }

    /// Signed values (e.g. from deserialized state) never panic or escape 0..=100.
    #[test]
    fn split_handles_signed_values(eff in -1_000_000i64..1_000_000, integ in -1_000_000i64..1_000_000) {
        let scores = Scores { efficiency: eff, integrity: integ };
        let split = scores.split();
        prop_assert!(split.efficiency_pct <= 100);
        prop_assert_eq!(split.efficiency_pct + split.integrity_pct, 100);
    }

    /// More efficiency never lowers the efficiency share.
    #[test]
    fn split_is_monotone_in_efficiency(eff in 0u32..1000, integ in 0u32..1000, extra in 1u32..100) {
        let mut a = Scores::default();
        a.bump_efficiency(eff);
        a.bump_integrity(integ);
        let mut b = a;
        b.bump_efficiency(extra);
        prop_assert!(b.split().efficiency_pct >= a.split().efficiency_pct);
    }
}

// ============================================================================
// Classifiers
// ============================================================================

proptest! {
    /// Yes and no never both match the same message.
    #[test]
    fn yes_and_no_are_mutually_exclusive(text in "\\PC{0,12}") {
        prop_assert!(!(is_yes(&text) && is_no(&text)));
    }

    /// Appending letters to "yes" breaks the exact match.
    #[test]
    fn yes_with_suffix_is_not_yes(suffix in "[a-z]{1,8}") {
        let text = format!("yes{}", suffix);
        prop_assert!(!is_yes(&text));
    }

    /// Activation survives any casing and surrounding whitespace.
    #[test]
    fn activation_is_case_insensitive(upper in proptest::collection::vec(any::<bool>(), 17), pad in "[ \\t]{0,3}") {
        let phrase: String = "i am elliot novak"
            .chars()
            .zip(upper.iter())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("{}{}.{}", pad, phrase, pad);
        prop_assert!(is_activation(&text));
    }

    /// Menu parsing only ever yields 1, 2 or 3.
    #[test]
    fn parse_option_in_range(text in "\\PC{0,20}") {
        if let Some(n) = parse_option(&text) {
            prop_assert!((1..=3).contains(&n));
        }
    }
}

// ============================================================================
// Pool anti-repeat
// ============================================================================

proptest! {
    /// Two consecutive draws from a pool of two or more entries never repeat.
    #[test]
    fn pool_never_repeats_consecutively(len in 2usize..20, draws in 2usize..60, seed in any::<u64>()) {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut last = history.pick("p", len, &mut rng);
        for _ in 1..draws {
            let next = history.pick("p", len, &mut rng);
            prop_assert!(next < len);
            prop_assert_ne!(next, last);
            last = next;
        }
    }

    /// Within the window, no index is served twice.
    #[test]
    fn pool_window_has_no_duplicates(len in 2usize..20, seed in any::<u64>()) {
        let mut history = PoolHistory::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let window = len.min(8);
        let mut served: Vec<usize> = (0..window).map(|_| history.pick("w", len, &mut rng)).collect();
        served.sort_unstable();
        served.dedup();
        prop_assert_eq!(served.len(), window);
    }
}
