//! Discord adapter.
//!
//! - `platform` -- `DiscordPlatform`, the `ChatPlatform` port over serenity's REST client
//! - `handler` -- gateway `EventHandler` feeding the core `EventDispatcher`
//! - `client` -- gateway client construction and intents
//! - `convert` -- mapping between serenity models and datebot types

pub mod client;
pub mod convert;
pub mod handler;
pub mod platform;

pub use client::{GATEWAY_INTENTS, build_client};
pub use handler::Handler;
pub use platform::DiscordPlatform;
