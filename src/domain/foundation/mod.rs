//! Foundation types shared across the domain.

mod ids;
mod intent;

pub use ids::{MessageId, SessionId};
pub use intent::{AgentName, Intent, ReplyIntent};
