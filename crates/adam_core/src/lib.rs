pub mod config;
pub mod intent;
pub mod pool;
pub mod score;
pub mod session;

pub use config::AdamConfig;
pub use pool::PoolHistory;
pub use score::{Ending, ScoreSplit, Scores};
pub use session::{
    CreatorStep, PendingChoice, PendingProve, Session, SessionHandle, SessionStore, ShippingStep,
};
