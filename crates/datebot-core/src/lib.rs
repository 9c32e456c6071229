//! Business logic for datebot.
//!
//! Calendar paging, per-user session tracking and the selection flow. The
//! chat platform is reached only through the `ChatPlatform` port defined
//! here -- this crate never depends on a platform SDK.

pub mod calendar;
pub mod command;
pub mod flow;
pub mod platform;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
