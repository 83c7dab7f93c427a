//! Keyword and exact-phrase intent classification.
//!
//! All predicates are pure and operate on raw user text; each one normalizes
//! internally (trim + lowercase). Exact categories compare the whole message
//! against a literal set so that "yesterday" never reads as "yes".

const ACTIVATION: &[&str] = &["i am elliot novak"];
const RESET: &[&str] = &["reset", "/reset", "reset session", "restart"];
const STOP: &[&str] = &["stop", "halt", "abort"];
const YES: &[&str] = &["yes", "y", "yeah", "yep", "affirmative"];
const NO: &[&str] = &["no", "n", "nope", "negative"];
const SPOILERS_ON: &[&str] = &["spoilers: on", "spoilers on"];

const FUTURE_RELEASE: &[&str] = &[
    "sequel",
    "book 2",
    "book two",
    "book 3",
    "book three",
    "next book",
    "next release",
    "release date",
    "coming out",
    "what's next",
    "coming soon",
];

const EASTER_EGG: &[&str] = &[
    "easter egg",
    "easter-egg",
    "hidden message",
    "secret code",
    "secret message",
];

const ALREADY_READ: &[&str] = &[
    "already read",
    "finished the book",
    "finished reading",
    "read it already",
    "i've read",
    "i have read",
];

const BOOK_MENTION: &[&str] = &[
    "book",
    "novel",
    "artificial",
    "copy",
    "paperback",
    "hardcover",
];

const PURCHASE_ACTION: &[&str] = &["buy", "purchase", "order", "shipping", "ship", "price", "cost"];

/// Trailing punctuation tolerated by the exact-match categories.
const TOLERATED_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// Trim surrounding whitespace and case-fold.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized form used by exact-match categories: trailing punctuation removed.
fn canonical(text: &str) -> String {
    normalize(text)
        .trim_end_matches(TOLERATED_PUNCTUATION)
        .trim_end()
        .to_string()
}

fn exact(text: &str, set: &[&str]) -> bool {
    let t = canonical(text);
    set.iter().any(|candidate| t == *candidate)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let t = normalize(text);
    keywords.iter().any(|k| t.contains(k))
}

pub fn is_activation(text: &str) -> bool {
    exact(text, ACTIVATION)
}

pub fn is_reset(text: &str) -> bool {
    exact(text, RESET)
}

pub fn is_stop(text: &str) -> bool {
    exact(text, STOP)
}

pub fn is_yes(text: &str) -> bool {
    exact(text, YES)
}

pub fn is_no(text: &str) -> bool {
    exact(text, NO)
}

pub fn is_spoiler_authorization(text: &str) -> bool {
    exact(text, SPOILERS_ON)
}

pub fn is_future_release_inquiry(text: &str) -> bool {
    contains_any(text, FUTURE_RELEASE)
}

pub fn is_easter_egg_inquiry(text: &str) -> bool {
    contains_any(text, EASTER_EGG)
}

pub fn is_already_read(text: &str) -> bool {
    contains_any(text, ALREADY_READ)
}

/// Purchase intent needs both a reference to the book and a buying/shipping verb.
pub fn is_purchase_intent(text: &str) -> bool {
    contains_any(text, BOOK_MENTION) && contains_any(text, PURCHASE_ACTION)
}

/// Answer to the control-versus-trust prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allegiance {
    Control,
    Trust,
    /// Both or neither keyword present.
    Undecided,
}

pub fn classify_allegiance(text: &str) -> Allegiance {
    let t = normalize(text);
    match (t.contains("control"), t.contains("trust")) {
        (true, false) => Allegiance::Control,
        (false, true) => Allegiance::Trust,
        _ => Allegiance::Undecided,
    }
}

pub fn mentions_outcome(text: &str) -> bool {
    normalize(text).contains("outcome")
}

pub fn mentions_principle(text: &str) -> bool {
    normalize(text).contains("principle")
}

pub fn mentions_archive(text: &str) -> bool {
    normalize(text).contains("archive")
}

/// Parse a menu selection: the text must contain exactly one ASCII digit and
/// it must be 1, 2 or 3.
pub fn parse_option(text: &str) -> Option<u8> {
    let mut digits = text.chars().filter(|c| c.is_ascii_digit());
    let first = digits.next()?;
    if digits.next().is_some() {
        return None;
    }
    match first {
        '1' => Some(1),
        '2' => Some(2),
        '3' => Some(3),
        _ => None,
    }
}
