//! `ChatPlatform` implementation over the Discord REST API.

use std::sync::Arc;

use serenity::http::Http;
use serenity::model::id::{
    ApplicationId, ChannelId as DiscordChannelId, GuildId as DiscordGuildId,
    InteractionId as DiscordInteractionId, MessageId as DiscordMessageId,
    RoleId as DiscordRoleId, UserId as DiscordUserId,
};

use datebot_core::platform::ChatPlatform;
use datebot_types::error::PlatformError;
use datebot_types::event::InteractionRef;
use datebot_types::ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
use datebot_types::outbound::{InteractionResponse, OutboundMessage};

use super::convert;

const ROLE_REMOVAL_REASON: &str = "datebot: setup completed";

/// Discord REST client shared by every handler and scheduled prompt.
///
/// Constructed once at startup. Follow-up messages need the application id,
/// which is only known after the gateway's ready event; call
/// [`DiscordPlatform::bind_application`] from the ready handler.
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    pub fn bind_application(&self, application_id: ApplicationId) {
        self.http.set_application_id(application_id);
    }
}

impl ChatPlatform for DiscordPlatform {
    async fn respond(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> Result<(), PlatformError> {
        let builder = convert::interaction_response(&response);
        self.http
            .create_interaction_response(
                DiscordInteractionId::new(interaction.id.get()),
                &interaction.token,
                &builder,
                Vec::new(),
            )
            .await
            .map_err(convert::platform_error)
    }

    async fn follow_up(
        &self,
        interaction: &InteractionRef,
        message: OutboundMessage,
    ) -> Result<(), PlatformError> {
        let builder = convert::follow_up(&message);
        self.http
            .create_followup_message(&interaction.token, &builder, Vec::new())
            .await
            .map(|_| ())
            .map_err(convert::platform_error)
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: OutboundMessage,
    ) -> Result<(), PlatformError> {
        let builder = convert::channel_message(&message);
        self.http
            .send_message(DiscordChannelId::new(channel_id.get()), Vec::new(), &builder)
            .await
            .map(|_| ())
            .map_err(convert::platform_error)
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), PlatformError> {
        self.http
            .delete_message(
                DiscordChannelId::new(channel_id.get()),
                DiscordMessageId::new(message_id.get()),
                None,
            )
            .await
            .map_err(convert::platform_error)
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), PlatformError> {
        self.http
            .remove_member_role(
                DiscordGuildId::new(guild_id.get()),
                DiscordUserId::new(user_id.get()),
                DiscordRoleId::new(role_id.get()),
                Some(ROLE_REMOVAL_REASON),
            )
            .await
            .map_err(convert::platform_error)
    }
}
