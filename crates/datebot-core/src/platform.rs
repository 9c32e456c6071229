//! Chat platform port.
//!
//! The selection flow and channel guard talk to the platform only through
//! `ChatPlatform`. The Discord implementation lives in `datebot-infra`; tests
//! use an in-memory recorder.

use std::future::Future;

use datebot_types::error::PlatformError;
use datebot_types::event::InteractionRef;
use datebot_types::ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
use datebot_types::outbound::{InteractionResponse, OutboundMessage};

/// Outbound operations the bot performs against the chat platform.
///
/// Uses RPITIT (return position `impl Trait` in traits) so implementations
/// can be written with plain `async fn`.
pub trait ChatPlatform: Send + Sync + 'static {
    /// Answer an interaction for the first time.
    fn respond(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Send an additional message for an already answered interaction.
    fn follow_up(
        &self,
        interaction: &InteractionRef,
        message: OutboundMessage,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Post a message in a channel.
    fn send_message(
        &self,
        channel_id: ChannelId,
        message: OutboundMessage,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Take a role away from a guild member.
    fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}
