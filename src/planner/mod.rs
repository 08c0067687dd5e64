//! Planner module containing schedule generation and draft derivation

pub mod core;
pub mod drafts;
pub mod schedule;

pub use self::core::*;
pub use drafts::*;
pub use schedule::*;
