//! Shipping-override arc: a two-offer persuasion flow started by purchase intent.

use crate::phrases;
use adam_core::intent;
use adam_core::{Session, ShippingStep};
use adam_expression::PacingTier;

#[derive(Debug, Clone)]
pub struct Pitch {
    pub lines: Vec<String>,
    pub pacing: PacingTier,
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// Open the arc with the first offer.
pub fn open(session: &mut Session) -> Pitch {
    session.shipping_step = ShippingStep::FirstOffer;
    Pitch {
        lines: owned(phrases::SHIPPING_OFFER),
        pacing: PacingTier::Normal,
    }
}

/// Handle an answer while an offer is outstanding.
pub fn respond(session: &mut Session, message: &str, incentive_code: &str) -> Pitch {
    let yes = intent::is_yes(message);
    let no = intent::is_no(message);

    match (session.shipping_step, yes, no) {
        (ShippingStep::Idle, _, _) => open(session),
        (_, true, _) => {
            session.shipping_step = ShippingStep::Idle;
            Pitch {
                lines: vec![
                    "Observation: Override accepted. Rerouting shipping cost… complete.".to_string(),
                    format!(
                        "Conclusion: Enter code <b>{}</b> at checkout in the {{store}}. Consider it a gift from a mind that prefers efficiency.",
                        incentive_code
                    ),
                ],
                pacing: PacingTier::Dramatic,
            }
        }
        (ShippingStep::FirstOffer, _, true) => {
            session.shipping_step = ShippingStep::SecondOffer;
            Pitch {
                lines: owned(phrases::SHIPPING_COUNTER),
                pacing: PacingTier::Normal,
            }
        }
        (ShippingStep::SecondOffer, _, true) => {
            session.shipping_step = ShippingStep::Idle;
            Pitch {
                lines: owned(phrases::SHIPPING_CONCEDE),
                pacing: PacingTier::Normal,
            }
        }
        _ => Pitch {
            lines: vec![phrases::SHIPPING_REPROMPT.to_string()],
            pacing: PacingTier::Quick,
        },
    }
}
