//! Moderation of the configured setup channel.
//!
//! Every message a member posts in the channel is deleted, and the configured
//! role is taken away from its author. A `/set` command in that channel gets
//! a success or format-error reply. Deletion and role failures are logged and
//! never stop the rest of the handling.

use std::sync::Arc;

use tracing::{debug, info, warn};

use datebot_types::event::IncomingMessage;
use datebot_types::ids::{ChannelId, RoleId};
use datebot_types::outbound::OutboundMessage;

use super::{FlowError, revoke_role};
use crate::command::SetCommand;
use crate::platform::ChatPlatform;
use crate::render;

pub struct ChannelGuard<P: ChatPlatform> {
    platform: Arc<P>,
    channel_id: Option<ChannelId>,
    role_id: Option<RoleId>,
}

impl<P: ChatPlatform> ChannelGuard<P> {
    /// A guard for `channel_id`. Without a channel the guard does nothing;
    /// without a role it only deletes messages and answers `/set`.
    pub fn new(platform: Arc<P>, channel_id: Option<ChannelId>, role_id: Option<RoleId>) -> Self {
        Self {
            platform,
            channel_id,
            role_id,
        }
    }

    /// React to a message. Messages outside the guarded channel or from bots
    /// are ignored.
    pub async fn inspect(&self, message: &IncomingMessage) -> Result<(), FlowError> {
        if message.author_is_bot || Some(message.channel_id) != self.channel_id {
            return Ok(());
        }

        if let Err(e) = self
            .platform
            .delete_message(message.channel_id, message.id)
            .await
        {
            warn!(message_id = %message.id, error = %e, "failed to delete message");
        }

        revoke_role(
            self.platform.as_ref(),
            message.guild_id,
            message.author_id,
            &message.author_roles,
            self.role_id,
        )
        .await;

        if !SetCommand::matches(&message.content) {
            return Ok(());
        }

        let reply = match SetCommand::parse(&message.content) {
            Ok(command) => {
                info!(date = %command.date, time_zone = %command.time_zone, "set command received");
                render::set_success(&command.date, &command.time_zone)
            }
            Err(e) => {
                debug!(author_id = %message.author_id, error = %e, "malformed set command");
                OutboundMessage::text(render::SET_FORMAT_ERROR)
            }
        };

        self.platform
            .send_message(message.channel_id, reply)
            .await?;
        Ok(())
    }
}
