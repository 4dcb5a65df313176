//! Routing domain - the decision core.
//!
//! Everything in this module is pure: ambiguity detection, turn-state
//! bookkeeping, and the routing functions that pick the next node. The
//! async glue that actually calls the oracle and retrieval capabilities
//! lives in the application layer.

mod ambiguity;
mod classification;
mod results;
mod router;
mod turn;

pub use ambiguity::{AmbiguityDetector, Clarification};
pub use classification::{Classification, ClassificationSource};
pub use results::{DocumentHit, SearchHit, WebHit};
pub use router::{
    keyword_fallback_intent, route_after_classify, route_after_pdf, wants_web_search, RouteTarget,
};
pub use turn::TurnState;
