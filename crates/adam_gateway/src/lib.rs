pub mod fingerprint;
pub mod server;
pub mod types;

pub use fingerprint::fingerprint;
pub use server::{router, AppState, GatewayServer};
pub use types::{ChatRequest, ChatResponse, ErrorBody};
