//! Conversation types.

mod model;

pub use model::{MessageRole, SessionSummary, Turn};
