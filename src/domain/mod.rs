//! Domain layer - pure business logic with no I/O dependencies.

pub mod conversation;
pub mod foundation;
pub mod routing;
