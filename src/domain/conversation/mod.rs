//! Conversation domain - per-session message history and rolling context.

mod context;
mod message;
mod session;

pub use context::{ContextUpdate, ConversationContext};
pub use message::{Message, MessageMetadata, MessageRole};
pub use session::Conversation;
