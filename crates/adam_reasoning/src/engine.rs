use crate::api_types::InputMessage;
use crate::creator::{self, Interceptor};
use crate::error::EngineError;
use crate::llm::{CompletionParams, LlmClient};
use crate::phrases;
use crate::prompts::system_instruction;
use crate::proof::{KeywordProofMatcher, ProofMatcher};
use crate::shipping;
use adam_core::intent;
use adam_core::{AdamConfig, CreatorStep, Session, ShippingStep};
use adam_expression::{PacingTier, ResponseComposer};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard};

/// Returned when the completion service yields no text.
pub const NO_TEXT_PLACEHOLDER: &str = "(No text returned)";

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Reset,
    Activation,
    /// Creator-mode transition, tagged with the step that handled the turn.
    Creator(CreatorStep),
    Intercepted(Interceptor),
    /// Shipping-override turn, tagged with the step after the turn.
    Shipping(ShippingStep),
    EasterEgg,
    AlreadyRead,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTML-flavored reply text.
    pub text: String,
    /// Transport-level hint; the engine itself never waits.
    pub pacing: PacingTier,
    pub route: Route,
}

/// Session-scoped dialogue engine.
///
/// Routing precedence per turn: reset, activation, active creator arc, active
/// shipping arc, passive interceptors, completion fallback.
pub struct DialogueEngine {
    llm: Box<dyn LlmClient>,
    composer: ResponseComposer,
    matcher: Box<dyn ProofMatcher>,
    rng: Mutex<StdRng>,
    system_prompt: String,
    silence_secs: i64,
    incentive_code: String,
    params: CompletionParams,
}

impl DialogueEngine {
    pub fn new(llm: Box<dyn LlmClient>, config: &AdamConfig) -> Self {
        let composer = ResponseComposer::new(&config.links);
        let system_prompt = system_instruction(&composer);
        Self {
            llm,
            composer,
            matcher: Box::new(KeywordProofMatcher),
            rng: Mutex::new(StdRng::from_entropy()),
            system_prompt,
            silence_secs: config.sessions.silence_secs,
            incentive_code: config.shipping.incentive_code.clone(),
            params: CompletionParams::default(),
        }
    }

    /// Replace the verification heuristic.
    pub fn with_matcher(mut self, matcher: Box<dyn ProofMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Deterministic phrase selection, for tests and replays.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_params(mut self, params: CompletionParams) -> Self {
        self.params = params;
        self
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn reply<S: AsRef<str>>(&self, route: Route, lines: &[S], pacing: PacingTier) -> Reply {
        Reply {
            text: self.composer.compose(lines),
            pacing,
            route,
        }
    }

    /// Run one turn against `session`.
    ///
    /// The session is mutated in place; on error it is left as it was before
    /// the completion call.
    pub async fn respond(
        &self,
        session: &mut Session,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<Reply, EngineError> {
        let text = message.trim();

        let reply = match self.route(session, text, now) {
            Some(reply) => reply,
            None => self.fallback(text).await?,
        };

        if reply.route != Route::Reset {
            session.touch(now);
        }
        tracing::debug!(
            route = ?reply.route,
            creator_step = session.creator_step.number(),
            shipping_step = u8::from(session.shipping_step),
            "Turn complete"
        );
        Ok(reply)
    }

    /// Scripted paths. `None` means the turn belongs to the completion gateway.
    fn route(&self, session: &mut Session, text: &str, now: DateTime<Utc>) -> Option<Reply> {
        if intent::is_reset(text) {
            session.reset(now);
            return Some(self.reply(Route::Reset, &[phrases::RESET], PacingTier::Quick));
        }

        if intent::is_activation(text) {
            tracing::info!("Creator mode activated");
            let lines = creator::activate(session);
            return Some(self.reply(Route::Activation, &lines, PacingTier::Dramatic));
        }

        if session.creator_active {
            return Some(self.creator_turn(session, text, now));
        }

        if session.shipping_active() {
            let pitch = shipping::respond(session, text, &self.incentive_code);
            let route = Route::Shipping(session.shipping_step);
            return Some(self.reply(route, &pitch.lines, pitch.pacing));
        }

        if intent::is_purchase_intent(text) {
            let pitch = shipping::open(session);
            let route = Route::Shipping(session.shipping_step);
            return Some(self.reply(route, &pitch.lines, pitch.pacing));
        }

        if intent::is_easter_egg_inquiry(text) {
            return Some(self.reply(Route::EasterEgg, phrases::EASTER_EGG, PacingTier::Normal));
        }

        if intent::is_already_read(text) {
            return Some(self.reply(Route::AlreadyRead, phrases::ALREADY_READ, PacingTier::Normal));
        }

        None
    }

    fn creator_turn(&self, session: &mut Session, text: &str, now: DateTime<Utc>) -> Reply {
        let mut rng = self.rng();
        let mut lines = Vec::new();

        let silent = session
            .idle_secs(now)
            .is_some_and(|idle| idle > self.silence_secs);
        if silent {
            lines.push(
                phrases::SILENCE
                    .pick(&mut session.pool_history, &mut *rng)
                    .to_string(),
            );
        }

        if let Some((kind, intercepted)) = creator::intercept(session, text) {
            lines.extend(intercepted);
            return self.reply(Route::Intercepted(kind), &lines, PacingTier::Quick);
        }

        let step = session.creator_step;
        let beat = creator::advance(session, text, &mut rng, self.matcher.as_ref());
        tracing::debug!(
            from = step.number(),
            to = beat.next.number(),
            "Creator transition"
        );
        lines.extend(beat.lines);
        self.reply(Route::Creator(step), &lines, beat.pacing)
    }

    async fn fallback(&self, text: &str) -> Result<Reply, EngineError> {
        let response = self
            .llm
            .complete(
                &self.system_prompt,
                vec![InputMessage::user(text)],
                self.params.clone(),
            )
            .await?;
        let text = response
            .first_text()
            .unwrap_or(NO_TEXT_PLACEHOLDER)
            .to_string();
        Ok(Reply {
            text,
            pacing: PacingTier::Quick,
            route: Route::Fallback,
        })
    }
}
