//! Chat handlers - the operations callers invoke on the core.

mod clear_session;
mod end_session;
mod get_history;
mod process_message;

pub use clear_session::{ClearSessionCommand, ClearSessionHandler, ClearSessionResult};
pub use end_session::{EndSessionCommand, EndSessionHandler, EndSessionResult};
pub use get_history::{GetHistoryCommand, GetHistoryHandler, GetHistoryResult};
pub use process_message::{
    ProcessMessageCommand, ProcessMessageHandler, ProcessMessageResult, ResponseMetadata,
};
