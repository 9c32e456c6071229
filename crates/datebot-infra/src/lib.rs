//! Infrastructure layer for datebot.
//!
//! Implements the `ChatPlatform` port from `datebot-core` on top of the
//! Discord gateway and REST API (serenity), and loads configuration from
//! `config.toml`, the environment and `.env`.

pub mod config;
pub mod discord;
