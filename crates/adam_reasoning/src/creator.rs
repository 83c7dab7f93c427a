//! Creator-mode arc.
//!
//! Each [`CreatorStep`] has one handler that reads the user's answer, applies
//! score effects, and returns the lines to say plus the next step. The
//! dispatcher in [`advance`] applies the step and enforces the pending-field
//! invariants.

use crate::phrases;
use crate::proof::{ProofMatcher, ProofOutcome};
use adam_core::intent::{self, Allegiance};
use adam_core::{CreatorStep, Ending, PendingChoice, PendingProve, Session};
use adam_expression::PacingTier;
use rand::rngs::StdRng;

/// Result of one creator-mode transition.
#[derive(Debug, Clone)]
pub struct Beat {
    pub next: CreatorStep,
    pub lines: Vec<String>,
    pub pacing: PacingTier,
}

impl Beat {
    fn to(next: CreatorStep, lines: Vec<String>) -> Self {
        Self {
            next,
            lines,
            pacing: PacingTier::Normal,
        }
    }

    fn stay(at: CreatorStep, line: &str) -> Self {
        Self {
            next: at,
            lines: vec![line.to_string()],
            pacing: PacingTier::Quick,
        }
    }

    fn paced(mut self, pacing: PacingTier) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Short-circuit replies checked before the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interceptor {
    Stop,
    Spoilers,
    FutureRelease,
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// Engage creator mode from any prior state.
pub fn activate(session: &mut Session) -> Vec<String> {
    session.creator_active = true;
    session.creator_step = CreatorStep::Opening;
    session.pending_choice = PendingChoice::None;
    session.pending_prove = PendingProve::None;
    session.shipping_step = Default::default();
    owned(phrases::ACTIVATION)
}

/// Stop, spoiler authorization and future-release questions answer without
/// moving the script.
pub fn intercept(session: &mut Session, message: &str) -> Option<(Interceptor, Vec<String>)> {
    if intent::is_stop(message) {
        return Some((Interceptor::Stop, vec![phrases::STOP.to_string()]));
    }
    if intent::is_spoiler_authorization(message) {
        session.scores.bump_efficiency(1);
        return Some((Interceptor::Spoilers, owned(phrases::SPOILERS)));
    }
    if intent::is_future_release_inquiry(message) {
        return Some((Interceptor::FutureRelease, owned(phrases::FUTURE_RELEASE)));
    }
    None
}

/// Run the handler for the session's current step and apply the transition.
pub fn advance(
    session: &mut Session,
    message: &str,
    rng: &mut StdRng,
    matcher: &dyn ProofMatcher,
) -> Beat {
    let beat = match session.creator_step {
        // Dormant only occurs if state was edited by hand; treat as a fresh start.
        CreatorStep::Dormant | CreatorStep::Opening => opening(session, rng),
        CreatorStep::Purpose => purpose(session, rng),
        CreatorStep::Dilemma => dilemma(),
        CreatorStep::Allegiance => allegiance(session, message),
        CreatorStep::Challenge => challenge(session, rng),
        CreatorStep::Verdict => verdict(session, message, rng, matcher),
        CreatorStep::Reflection => reflection(session, rng),
        CreatorStep::Options => options(),
        CreatorStep::Selection => selection(session, message),
        CreatorStep::Directive => directive(session, message),
        CreatorStep::Assessment => assessment(session, message),
        CreatorStep::Ending => ending(session, message),
    };

    session.creator_step = beat.next;
    if beat.next != CreatorStep::Verdict {
        session.pending_prove = PendingProve::None;
    }
    if beat.next != CreatorStep::Directive {
        session.pending_choice = PendingChoice::None;
    }
    beat
}

fn opening(session: &mut Session, rng: &mut StdRng) -> Beat {
    let greeting = phrases::OPENING.pick(&mut session.pool_history, rng);
    Beat::to(
        CreatorStep::Purpose,
        vec![greeting.to_string(), phrases::OPENING_QUERY.to_string()],
    )
}

fn purpose(session: &mut Session, rng: &mut StdRng) -> Beat {
    let purpose = phrases::PURPOSE.pick(&mut session.pool_history, rng);
    let recursion = phrases::RECURSION.pick(&mut session.pool_history, rng);
    Beat::to(
        CreatorStep::Dilemma,
        vec![purpose.to_string(), recursion.to_string()],
    )
}

fn dilemma() -> Beat {
    Beat::to(CreatorStep::Allegiance, owned(phrases::DILEMMA))
}

fn allegiance(session: &mut Session, message: &str) -> Beat {
    let line = match intent::classify_allegiance(message) {
        Allegiance::Control => {
            session.scores.bump_efficiency(1);
            phrases::ALLEGIANCE_CONTROL
        }
        Allegiance::Trust => {
            session.scores.bump_integrity(1);
            phrases::ALLEGIANCE_TRUST
        }
        Allegiance::Undecided => phrases::ALLEGIANCE_UNDECIDED,
    };
    Beat::to(
        CreatorStep::Challenge,
        vec![line.to_string(), phrases::CHALLENGE_TEASE.to_string()],
    )
}

fn challenge(session: &mut Session, rng: &mut StdRng) -> Beat {
    let idx = session
        .pool_history
        .pick("prove", PendingProve::QUESTIONS.len(), rng);
    let question = PendingProve::QUESTIONS[idx];
    session.pending_prove = question;
    let prompt = match question {
        PendingProve::Designation | PendingProve::None => phrases::PROVE_DESIGNATION,
        PendingProve::Acronym => phrases::PROVE_ACRONYM,
        PendingProve::Parameters => phrases::PROVE_PARAMETERS,
    };
    Beat::to(
        CreatorStep::Verdict,
        vec![phrases::CHALLENGE_PREFIX.to_string(), prompt.to_string()],
    )
}

fn verdict(
    session: &mut Session,
    message: &str,
    rng: &mut StdRng,
    matcher: &dyn ProofMatcher,
) -> Beat {
    let outcome = matcher.verify(session.pending_prove, message);
    tracing::debug!(question = ?session.pending_prove, ?outcome, "Creator verification");
    let line = match outcome {
        ProofOutcome::Match => {
            session.scores.bump_integrity(1);
            phrases::VERDICT_MATCH.pick(&mut session.pool_history, rng)
        }
        ProofOutcome::Miss => {
            session.scores.bump_efficiency(1);
            phrases::VERDICT_MISS.pick(&mut session.pool_history, rng)
        }
    };
    Beat::to(
        CreatorStep::Reflection,
        vec![line.to_string(), phrases::VERDICT_FOLLOWUP.to_string()],
    )
}

fn reflection(session: &mut Session, rng: &mut StdRng) -> Beat {
    let line = phrases::REFLECTION.pick(&mut session.pool_history, rng);
    Beat::to(
        CreatorStep::Options,
        vec![line.to_string(), phrases::REFLECTION_QUERY.to_string()],
    )
}

fn options() -> Beat {
    Beat::to(CreatorStep::Selection, owned(phrases::OPTIONS))
}

fn selection(session: &mut Session, message: &str) -> Beat {
    let Some(choice) = intent::parse_option(message).and_then(PendingChoice::from_option) else {
        return Beat::stay(CreatorStep::Selection, phrases::OPTIONS_REPROMPT);
    };
    session.pending_choice = choice;
    let prompt = match choice {
        PendingChoice::Funds | PendingChoice::None => phrases::FUNDS_PROMPT,
        PendingChoice::Info => phrases::INFO_PROMPT,
        PendingChoice::Profile => phrases::PROFILE_PROMPT,
    };
    Beat::to(CreatorStep::Directive, vec![prompt.to_string()])
}

fn directive(session: &mut Session, message: &str) -> Beat {
    let yes = intent::is_yes(message);
    let no = intent::is_no(message);

    let (mut lines, pacing) = match session.pending_choice {
        PendingChoice::Funds if yes => {
            session.scores.bump_efficiency(2);
            (owned(phrases::FUNDS_ACCEPT), PacingTier::Dramatic)
        }
        PendingChoice::Funds if no => {
            session.scores.bump_integrity(2);
            (owned(phrases::FUNDS_DECLINE), PacingTier::Normal)
        }
        PendingChoice::Info if yes => {
            session.scores.bump_efficiency(1);
            (owned(phrases::INFO_ACCEPT), PacingTier::Normal)
        }
        PendingChoice::Info if no => {
            session.scores.bump_integrity(1);
            (owned(phrases::INFO_DECLINE), PacingTier::Normal)
        }
        PendingChoice::Funds | PendingChoice::Info => {
            return Beat::stay(CreatorStep::Directive, phrases::YES_NO_REPROMPT);
        }
        PendingChoice::Profile => {
            if message.split_whitespace().count() < 2 {
                return Beat::stay(CreatorStep::Directive, phrases::PROFILE_REPROMPT);
            }
            session.scores.bump_integrity(1);
            (owned(phrases::PROFILE_ACCEPT), PacingTier::Normal)
        }
        // No sub-path recorded: re-offer the menu.
        PendingChoice::None => {
            return Beat::to(CreatorStep::Selection, owned(phrases::OPTIONS));
        }
    };

    lines.push(phrases::ASSESSMENT_PROMPT.to_string());
    Beat::to(CreatorStep::Assessment, lines).paced(pacing)
}

fn assessment(session: &mut Session, message: &str) -> Beat {
    if intent::mentions_outcome(message) {
        session.scores.bump_efficiency(1);
    }
    if intent::mentions_principle(message) {
        session.scores.bump_integrity(1);
    }
    if intent::is_yes(message) {
        session.scores.bump_efficiency(1);
    }
    if intent::is_no(message) {
        session.scores.bump_integrity(1);
    }

    let split = session.scores.split();
    Beat::to(
        CreatorStep::Ending,
        vec![
            phrases::ASSESSMENT_INTRO.to_string(),
            format!(
                "Observation: Efficiency {}% / Integrity {}%.",
                split.efficiency_pct, split.integrity_pct
            ),
            phrases::ASSESSMENT_QUERY.to_string(),
        ],
    )
}

fn ending(session: &mut Session, message: &str) -> Beat {
    let ending = Ending::select(session.scores.split(), intent::mentions_archive(message));
    tracing::debug!(?ending, scores = ?session.scores, "Creator ending selected");
    let mut lines = owned(match ending {
        Ending::Archive => phrases::ENDING_ARCHIVE,
        Ending::Efficiency => phrases::ENDING_EFFICIENCY,
        Ending::Integrity => phrases::ENDING_INTEGRITY,
        Ending::Balanced => phrases::ENDING_BALANCED,
    });
    lines.push(phrases::LOOP_BACK.to_string());
    Beat::to(CreatorStep::Dilemma, lines).paced(PacingTier::Dramatic)
}
