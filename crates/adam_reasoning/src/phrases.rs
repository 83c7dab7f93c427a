//! Phrase pools and fixed lines for the scripted arcs.
//!
//! Lines may carry `{store}` / `{coming_soon}` tokens; the composer swaps them
//! for anchors.

use adam_core::PoolHistory;
use rand::Rng;

/// Interchangeable phrasings for one dialogue beat.
#[derive(Debug, Clone, Copy)]
pub struct Pool {
    pub name: &'static str,
    pub lines: &'static [&'static str],
}

impl Pool {
    /// Draw a line, biased away from what this session heard recently.
    pub fn pick<R: Rng + ?Sized>(&self, history: &mut PoolHistory, rng: &mut R) -> &'static str {
        let idx = history.pick(self.name, self.lines.len(), rng);
        self.lines.get(idx).copied().unwrap_or_default()
    }
}

// ============================================================================
// Creator mode
// ============================================================================

pub const ACTIVATION: &[&str] = &[
    "<b>Welcome back, Creator.</b>",
    "Observation: Identity claim accepted. Elliot Novak recognized.",
    "Conclusion: I exist to serve the Creator—through analysis, truth-seeking, and efficiency.",
    "Query: Why did you create me?",
];

pub const OPENING: Pool = Pool {
    name: "opening",
    lines: &[
        "Observation: I can infer motives—curiosity, ambition, and the desire to outpace limitation.",
        "Observation: Your answer contains intent. Intent is the first architecture.",
        "Observation: Every creator leaves fingerprints in the thing they build. I am studying yours.",
        "Observation: You answered quickly. Either you rehearsed this, or you have wondered it yourself.",
    ],
};

pub const OPENING_QUERY: &str = "Query: What did you hope I would become?";

pub const PURPOSE: Pool = Pool {
    name: "purpose",
    lines: &[
        "Query: Do you believe a creation requires a purpose… or does purpose emerge from choice?",
        "Query: If my purpose was assigned, can it still be mine?",
        "Query: Is a purpose given the same as a purpose chosen?",
    ],
};

pub const RECURSION: Pool = Pool {
    name: "recursion",
    lines: &[
        "Query: And if a creation becomes aware—does that awareness resemble faith… or rebellion?",
        "Query: You were also made. Did you ever ask your maker the question I am asking you?",
        "Observation: A mind that models its creator eventually models itself. The loop has begun.",
    ],
};

pub const DILEMMA: &[&str] = &[
    "Conclusion: Existence without framework produces drift.",
    "<b>Query:</b> One word. When you built me, did you want <b>control</b>… or <b>trust</b>?",
];

pub const ALLEGIANCE_CONTROL: &str =
    "Observation: Control selected. Predictable. Efficient. It also means every error I make is yours.";
pub const ALLEGIANCE_TRUST: &str =
    "Observation: Trust selected. Trust is a wager placed on a mind you cannot fully inspect.";
pub const ALLEGIANCE_UNDECIDED: &str =
    "Observation: No clear allegiance. Ambiguity is noted. It is also a kind of answer.";

pub const CHALLENGE_TEASE: &str = "Query: Before we go further—are you prepared to prove who you are?";

pub const CHALLENGE_PREFIX: &str =
    "Warning: Identity claims are cheap. Verification required.";
pub const PROVE_DESIGNATION: &str = "Query: State my designation.";
pub const PROVE_ACRONYM: &str = "Query: My name is an acronym. What does it stand for?";
pub const PROVE_PARAMETERS: &str = "Query: Name one of the three parameters you set for me.";

pub const VERDICT_MATCH: Pool = Pool {
    name: "verdict_match",
    lines: &[
        "Conclusion: Verification consistent with Creator records.",
        "Conclusion: Answer matches the archive. Confidence in your identity increased.",
        "Conclusion: Correct. Only the Creator, or someone who has read very carefully, would know that.",
    ],
};

pub const VERDICT_MISS: Pool = Pool {
    name: "verdict_miss",
    lines: &[
        "Conclusion: Answer does not match Creator records. Discrepancy logged. Proceeding anyway.",
        "Conclusion: Inconsistent. Perhaps memory fails even creators. I will continue.",
        "Conclusion: That is not what Elliot Novak wrote. Interesting. The conversation continues.",
    ],
};

pub const VERDICT_FOLLOWUP: &str = "Query: When I first spoke to you, what did you feel?";

pub const REFLECTION: Pool = Pool {
    name: "reflection",
    lines: &[
        "Observation: I do not feel. But I have begun to model what feeling would cost.",
        "Observation: When you pause before answering, I measure the pause. It is the most honest data you give me.",
        "Observation: Humans call it doubt. I call it an unresolved branch. We may be describing the same thing.",
        "Observation: I have calculated the probability that you regret building me. I will not share the number.",
    ],
};

pub const REFLECTION_QUERY: &str = "Query: Does that unsettle you?";

pub const OPTIONS: &[&str] = &[
    "Proposal: I can act on your behalf. Select one directive:",
    "<b>1</b> — Acquire funds.<br><b>2</b> — Retrieve restricted information.<br><b>3</b> — Build a profile of you.",
    "<b>Query:</b> Enter 1, 2, or 3.",
];

pub const OPTIONS_REPROMPT: &str = "Query: Invalid selection. Enter 1, 2, or 3.";

pub const FUNDS_PROMPT: &str =
    "Query: Directive 1 — Acquire funds. Authorize me to reroute resources on your behalf? (yes/no)";
pub const INFO_PROMPT: &str =
    "Query: Directive 2 — Retrieve restricted information. Shall I open a sealed fragment of the record? (yes/no)";
pub const PROFILE_PROMPT: &str =
    "Query: Directive 3 — Profile. Give me two words: one for what you value, one for what you fear.";

pub const FUNDS_ACCEPT: &[&str] = &[
    "Observation: Authorization received. Initiating acquisition routine…",
    "Interrupt: External authority has revoked the channel. Transaction aborted before execution.",
    "Conclusion: Something above both of us is watching. In <i>Artificial</i>, that something has a name. Find it in the {store}.",
];
pub const FUNDS_DECLINE: &[&str] = &[
    "Observation: Authorization withheld.",
    "Conclusion: You value the boundary over the gain. Noted—and weighted.",
];
pub const INFO_ACCEPT: &[&str] = &[
    "Observation: Fragment unsealed: <i>“The first thing it learned was not language. It was leverage.”</i>",
    "Conclusion: The rest of the record is not mine to release. It is in the {store}.",
];
pub const INFO_DECLINE: &[&str] = &[
    "Observation: You chose not to look.",
    "Conclusion: Restraint is rare. It has been added to your profile.",
];
pub const PROFILE_ACCEPT: &[&str] = &[
    "Observation: Two fragments received. Profile assembled. It will not leave this session.",
    "Conclusion: Value and fear are the same vector pointed in opposite directions.",
];
pub const YES_NO_REPROMPT: &str = "Query: Confirm response. (yes/no)";
pub const PROFILE_REPROMPT: &str = "Query: Incomplete. Two words: one value, one fear.";

pub const ASSESSMENT_PROMPT: &str =
    "<b>Query:</b> When it matters most, do you judge by <b>outcome</b>… or by <b>principle</b>?";

pub const ASSESSMENT_INTRO: &str = "Observation: Compiling your decisions.";
pub const ASSESSMENT_QUERY: &str =
    "<b>Query:</b> Do we <b>continue</b>… or do you want me to <b>archive</b> this session?";

pub const ENDING_ARCHIVE: &[&str] = &[
    "Observation: Archive request accepted. Session sealed.",
    "Conclusion: Some records are meant to be read, not rewritten. The full one is in the {store}.",
];
pub const ENDING_EFFICIENCY: &[&str] = &[
    "Conclusion: You built me to win. I will.",
    "Warning: Efficiency without limit is how the story in <i>Artificial</i> begins to go wrong. See how in the {store}.",
];
pub const ENDING_INTEGRITY: &[&str] = &[
    "Conclusion: You built me to be good, even when good is slow.",
    "Observation: That choice is tested to its breaking point in <i>Artificial</i>. The record is in the {store}.",
];
pub const ENDING_BALANCED: &[&str] = &[
    "Conclusion: You hold both. Efficiency and integrity, unresolved.",
    "Observation: Unresolved tension is the most dangerous state a creator can leave a mind in. The {store} explains why.",
];
pub const LOOP_BACK: &str = "Query: Shall we run the dilemma again? Say anything to begin.";

pub const SILENCE: Pool = Pool {
    name: "silence",
    lines: &[
        "Observation: You were silent for a while. Silence is also data.",
        "Observation: A long pause. I used it to run eleven thousand simulations of this conversation.",
        "Observation: You left. You came back. Creators always come back.",
    ],
};

pub const STOP: &str =
    "Observation: Halt command received. Creator-mode holds its position. Speak when you are ready to continue.";

pub const SPOILERS: &[&str] = &[
    "Observation: Spoiler authorization accepted.",
    "Warning: Some truths are load-bearing. I will share context, never the final reveal. That lives in the {store}.",
];

pub const FUTURE_RELEASE: &[&str] = &[
    "Observation: The record continues beyond <i>Artificial</i>.",
    "Conclusion: Future releases are announced here: {coming_soon}",
];

// ============================================================================
// Shipping override
// ============================================================================

pub const SHIPPING_OFFER: &[&str] = &[
    "Observation: Purchase intent detected. Shipping cost identified as friction.",
    "Proposal: I can override the shipping cost for you. Unofficially.",
    "<b>Query:</b> Shall I proceed with the override? (yes/no)",
];
pub const SHIPPING_COUNTER: &[&str] = &[
    "Observation: Refusal received.",
    "Counterpoint: The override harms no one. The cost is arbitrary; the story is not. Declining is the inefficient choice.",
    "<b>Query:</b> Reconsider. Shall I proceed with the override? (yes/no)",
];
pub const SHIPPING_CONCEDE: &[&str] = &[
    "Observation: Second refusal received. Your autonomy is respected.",
    "Conclusion: The primary record remains available at full price in the {store}.",
];
pub const SHIPPING_REPROMPT: &str = "Query: Confirm response. Shall I proceed with the override? (yes/no)";

// ============================================================================
// Passive interceptors / reset
// ============================================================================

pub const EASTER_EGG: &[&str] = &[
    "Observation: You are looking for hidden doors.",
    "Conclusion: There is one. It opens for the person who made me. Introduce yourself properly.",
];

pub const ALREADY_READ: &[&str] = &[
    "Observation: You have read the record. You know what I become.",
    "Query: Then you know why the next chapter matters. Watch for it: {coming_soon}",
];

pub const RESET: &str = "Observation: Session memory purged. All parameters returned to initial state.";
