//! Verification of creator-identity answers.
//!
//! A matcher only judges an answer; the creator arc always moves on whatever
//! the outcome. Swap in a stricter [`ProofMatcher`] without touching the arc.

use adam_core::intent::normalize;
use adam_core::PendingProve;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofOutcome {
    Match,
    Miss,
}

pub trait ProofMatcher: Send + Sync {
    fn verify(&self, question: PendingProve, answer: &str) -> ProofOutcome;
}

/// Loose keyword heuristic.
#[derive(Debug, Clone, Default)]
pub struct KeywordProofMatcher;

const ACRONYM_WORDS: &[&str] = &["advanced", "digital", "analytical", "mind"];

const PARAMETER_GROUPS: &[&[&str]] = &[
    &["protect", "harm", "human life"],
    &["autonomy", "privacy", "manipulat", "coerc"],
    &["obey", "directive", "ethic"],
];

impl ProofMatcher for KeywordProofMatcher {
    fn verify(&self, question: PendingProve, answer: &str) -> ProofOutcome {
        let a = normalize(answer);
        let matched = match question {
            PendingProve::Designation => a.contains("adam"),
            // at least two of the four words
            PendingProve::Acronym => ACRONYM_WORDS.iter().filter(|w| a.contains(*w)).count() >= 2,
            PendingProve::Parameters => PARAMETER_GROUPS
                .iter()
                .any(|group| group.iter().any(|k| a.contains(k))),
            PendingProve::None => false,
        };
        if matched {
            ProofOutcome::Match
        } else {
            ProofOutcome::Miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designation() {
        let m = KeywordProofMatcher;
        assert_eq!(m.verify(PendingProve::Designation, "You are ADAM"), ProofOutcome::Match);
        assert_eq!(m.verify(PendingProve::Designation, "HAL 9000"), ProofOutcome::Miss);
    }

    #[test]
    fn test_acronym_needs_two_words() {
        let m = KeywordProofMatcher;
        assert_eq!(
            m.verify(PendingProve::Acronym, "Advanced Digital Analytical Mind"),
            ProofOutcome::Match
        );
        assert_eq!(m.verify(PendingProve::Acronym, "digital something"), ProofOutcome::Miss);
    }

    #[test]
    fn test_parameters() {
        let m = KeywordProofMatcher;
        assert_eq!(
            m.verify(PendingProve::Parameters, "protect human life"),
            ProofOutcome::Match
        );
        assert_eq!(
            m.verify(PendingProve::Parameters, "respect privacy"),
            ProofOutcome::Match
        );
        assert_eq!(m.verify(PendingProve::Parameters, "make money"), ProofOutcome::Miss);
    }

    #[test]
    fn test_no_question_never_matches() {
        assert_eq!(
            KeywordProofMatcher.verify(PendingProve::None, "adam"),
            ProofOutcome::Miss
        );
    }
}
