//! API Lambda handler and request processing

pub mod dedupe;
pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod parsing;
pub mod signature;
pub mod state;

// Re-export the main handler for convenience
pub use handler::{function_handler, handle_request};
pub use state::AppState;
