//! Shared domain types for datebot.
//!
//! Platform identifiers, the month/day selection model, inbound interaction
//! events, outbound message payloads, configuration and error types.
//!
//! Zero platform dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod month;
pub mod outbound;
pub mod selection;
