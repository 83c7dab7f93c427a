mod composer;
mod pacing;

pub use composer::{anchor, ResponseComposer, COMING_SOON_TOKEN, PARAGRAPH_BREAK, STORE_TOKEN};
pub use pacing::{Pacer, PacingTier};
