//! Web search adapters.

mod http_web_search;
mod static_web_search;

pub use http_web_search::HttpWebSearch;
pub use static_web_search::StaticWebSearch;
