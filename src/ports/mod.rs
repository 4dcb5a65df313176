//! Ports - interfaces to the external collaborators of the core.
//!
//! The core consumes three capabilities (language oracle, document
//! retrieval, web search) and one stateful collaborator (the conversation
//! store). Each is a narrow async trait; adapters provide the concrete
//! implementations.

mod conversation_store;
mod document_retrieval;
mod language_oracle;
mod web_search;

pub use conversation_store::ConversationStore;
pub use document_retrieval::{DocumentRetrieval, RetrievalError};
pub use language_oracle::{LanguageOracle, OracleError};
pub use web_search::WebSearch;
