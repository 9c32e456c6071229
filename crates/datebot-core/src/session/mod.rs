//! Per-user session tracking.
//!
//! - `store` -- `SessionStore`, the TTL- and capacity-bounded selection map
//! - `nudge` -- `NudgeScheduler`, cancellable delayed confirmation prompts

pub mod nudge;
pub mod store;

pub use nudge::NudgeScheduler;
pub use store::SessionStore;
