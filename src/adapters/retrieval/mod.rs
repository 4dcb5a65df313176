//! Document retrieval adapters.

mod http_document_index;
mod in_memory_document_index;

pub use http_document_index::HttpDocumentIndex;
pub use in_memory_document_index::InMemoryDocumentIndex;
