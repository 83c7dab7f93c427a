//! Per-fingerprint dialogue session and the bounded store that holds them.

use crate::pool::PoolHistory;
use crate::score::Scores;
use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

// ============================================================================
// Dialogue state enums
// ============================================================================

/// Named positions in the creator-mode script. The numeric value is the step
/// number exposed in logs and serialized state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CreatorStep {
    #[default]
    Dormant = 0,
    Opening = 1,
    Purpose = 2,
    Dilemma = 3,
    Allegiance = 4,
    Challenge = 5,
    Verdict = 6,
    Reflection = 7,
    Options = 8,
    Selection = 9,
    Directive = 10,
    Assessment = 11,
    Ending = 12,
}

impl CreatorStep {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl From<CreatorStep> for u8 {
    fn from(step: CreatorStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for CreatorStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        use CreatorStep::*;
        Ok(match n {
            0 => Dormant,
            1 => Opening,
            2 => Purpose,
            3 => Dilemma,
            4 => Allegiance,
            5 => Challenge,
            6 => Verdict,
            7 => Reflection,
            8 => Options,
            9 => Selection,
            10 => Directive,
            11 => Assessment,
            12 => Ending,
            other => return Err(format!("creator step out of range: {}", other)),
        })
    }
}

/// Sub-path awaiting an answer at [`CreatorStep::Directive`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingChoice {
    #[default]
    None,
    Funds,
    Info,
    Profile,
}

impl PendingChoice {
    pub fn from_option(option: u8) -> Option<Self> {
        match option {
            1 => Some(PendingChoice::Funds),
            2 => Some(PendingChoice::Info),
            3 => Some(PendingChoice::Profile),
            _ => None,
        }
    }
}

/// Verification question asked at [`CreatorStep::Challenge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingProve {
    #[default]
    None,
    Designation,
    Acronym,
    Parameters,
}

impl PendingProve {
    pub const QUESTIONS: [PendingProve; 3] = [
        PendingProve::Designation,
        PendingProve::Acronym,
        PendingProve::Parameters,
    ];
}

/// Position in the shipping-override arc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ShippingStep {
    #[default]
    Idle = 0,
    FirstOffer = 1,
    SecondOffer = 2,
}

impl From<ShippingStep> for u8 {
    fn from(step: ShippingStep) -> Self {
        step as u8
    }
}

impl TryFrom<u8> for ShippingStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(ShippingStep::Idle),
            1 => Ok(ShippingStep::FirstOffer),
            2 => Ok(ShippingStep::SecondOffer),
            other => Err(format!("shipping step out of range: {}", other)),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub creator_active: bool,
    pub creator_step: CreatorStep,
    pub pending_choice: PendingChoice,
    pub pending_prove: PendingProve,
    pub pool_history: PoolHistory,
    pub scores: Scores,
    pub shipping_step: ShippingStep,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            creator_active: false,
            creator_step: CreatorStep::Dormant,
            pending_choice: PendingChoice::None,
            pending_prove: PendingProve::None,
            pool_history: PoolHistory::new(),
            scores: Scores::default(),
            shipping_step: ShippingStep::Idle,
            last_seen_at: None,
            updated_at: now,
        }
    }

    /// Return every field to its initial value.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    /// Record that a turn completed at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = Some(now);
        self.updated_at = now;
    }

    /// Seconds since the previous turn, if there was one.
    pub fn idle_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_seen_at.map(|seen| (now - seen).num_seconds())
    }

    pub fn shipping_active(&self) -> bool {
        self.shipping_step != ShippingStep::Idle
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

// ============================================================================
// SessionStore
// ============================================================================

/// Shared handle to one fingerprint's session. Holding the lock serializes
/// overlapping turns from the same client.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Bounded least-recently-used map from fingerprint to session.
pub struct SessionStore {
    cache: std::sync::Mutex<LruCache<String, SessionHandle>>,
}

pub const DEFAULT_CAPACITY: usize = 2000;

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN));
        Self {
            cache: std::sync::Mutex::new(LruCache::new(capacity)),
        }
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, LruCache<String, SessionHandle>> {
        // A panic elsewhere never leaves the map itself half-written.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Handle for `key`, creating a fresh session on first contact.
    /// Touching a key refreshes its recency.
    pub fn handle(&self, key: &str) -> SessionHandle {
        let mut cache = self.cache();
        if let Some(existing) = cache.get(key) {
            return existing.clone();
        }
        let handle = Arc::new(Mutex::new(Session::new(Utc::now())));
        if let Some((evicted, _)) = cache.push(key.to_string(), handle.clone()) {
            if evicted != key {
                tracing::debug!("Session store full, evicted least recent fingerprint");
            }
        }
        handle
    }

    /// Snapshot of the session for `key`, or a fresh one.
    pub async fn get(&self, key: &str) -> Session {
        let handle = self.handle(key);
        let session = handle.lock().await;
        session.clone()
    }

    /// Overwrite the session for `key`.
    pub fn set(&self, key: &str, session: Session) {
        self.cache()
            .put(key.to_string(), Arc::new(Mutex::new(session)));
    }

    /// When more than `max_size` sessions are held, drop the least recently
    /// used 20% of `max_size`.
    pub fn prune(&self, max_size: usize) -> usize {
        let mut cache = self.cache();
        if cache.len() <= max_size {
            return 0;
        }
        let to_delete = ((max_size as f64) * 0.2).floor().max(1.0) as usize;
        let mut removed = 0;
        while removed < to_delete && cache.pop_lru().is_some() {
            removed += 1;
        }
        tracing::debug!("Pruned {} sessions ({} remain)", removed, cache.len());
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache().contains(key)
    }

    pub fn len(&self) -> usize {
        self.cache().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_initial() {
        let s = Session::default();
        assert!(!s.creator_active);
        assert_eq!(s.creator_step, CreatorStep::Dormant);
        assert_eq!(s.pending_choice, PendingChoice::None);
        assert_eq!(s.pending_prove, PendingProve::None);
        assert_eq!(s.shipping_step, ShippingStep::Idle);
        assert_eq!(s.scores, Scores::default());
        assert!(s.last_seen_at.is_none());
    }

    #[test]
    fn test_reset_restores_every_field() {
        let now = Utc::now();
        let mut s = Session::new(now);
        s.creator_active = true;
        s.creator_step = CreatorStep::Directive;
        s.pending_choice = PendingChoice::Funds;
        s.pending_prove = PendingProve::Acronym;
        s.scores.bump_efficiency(3);
        s.shipping_step = ShippingStep::SecondOffer;
        s.touch(now);
        s.reset(now);
        assert_eq!(s, Session::new(now));
    }

    #[test]
    fn test_step_serializes_as_number() {
        let mut s = Session::default();
        s.creator_step = CreatorStep::Selection;
        s.shipping_step = ShippingStep::FirstOffer;
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["creator_step"], 9);
        assert_eq!(json["shipping_step"], 1);
        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back.creator_step, CreatorStep::Selection);
    }

    #[test]
    fn test_step_out_of_range_rejected() {
        assert!(CreatorStep::try_from(13).is_err());
        assert!(ShippingStep::try_from(3).is_err());
    }

    #[tokio::test]
    async fn test_get_returns_fresh_then_set_overwrites() {
        let store = SessionStore::new(10);
        let fresh = store.get("a").await;
        assert!(!fresh.creator_active);

        let mut s = fresh.clone();
        s.creator_active = true;
        store.set("a", s);
        assert!(store.get("a").await.creator_active);
    }

    #[tokio::test]
    async fn test_handle_is_shared_per_key() {
        let store = SessionStore::new(10);
        let h1 = store.handle("k");
        h1.lock().await.creator_step = CreatorStep::Purpose;
        let h2 = store.handle("k");
        assert_eq!(h2.lock().await.creator_step, CreatorStep::Purpose);
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let store = SessionStore::new(3);
        store.handle("a");
        store.handle("b");
        store.handle("c");
        // refresh "a" so "b" becomes the oldest
        store.handle("a");
        store.handle("d");
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_prune_removes_twenty_percent() {
        let store = SessionStore::new(100);
        for i in 0..60 {
            store.handle(&format!("fp{}", i));
        }
        assert_eq!(store.prune(60), 0);
        assert_eq!(store.prune(50), 10);
        assert_eq!(store.len(), 50);
        assert!(!store.contains("fp0"));
        assert!(store.contains("fp59"));
    }
}
