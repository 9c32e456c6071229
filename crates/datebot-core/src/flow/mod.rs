//! Event handling: the month/day selection flow and the channel guard.
//!
//! - `selection` -- `SelectionFlow`, the paged month/day state machine
//! - `guard` -- `ChannelGuard`, per-message moderation of the configured channel
//!
//! `EventDispatcher` is the single entry point the platform adapter feeds.
//! It never returns an error: failures are logged and, for interactions,
//! answered with a generic ephemeral message.

pub mod guard;
pub mod selection;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use datebot_types::config::BotConfig;
use datebot_types::error::{InteractionError, PlatformError};
use datebot_types::event::{ComponentEvent, InboundEvent, IncomingMessage, InteractionRef};
use datebot_types::ids::{ChannelId, GuildId, RoleId, UserId};
use datebot_types::outbound::{InteractionResponse, OutboundMessage};

use crate::command;
use crate::platform::ChatPlatform;
use crate::render;
use crate::session::{NudgeScheduler, SessionStore};

pub use guard::ChannelGuard;
pub use selection::SelectionFlow;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Runtime knobs for the flow, derived from `BotConfig`.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub channel_id: Option<ChannelId>,
    pub role_id: Option<RoleId>,
    pub time_zone: String,
    pub nudge_delay: Duration,
}

impl From<&BotConfig> for FlowSettings {
    fn from(config: &BotConfig) -> Self {
        Self {
            channel_id: config.channel_id,
            role_id: config.role_id,
            time_zone: config.time_zone.clone(),
            nudge_delay: config.nudge_delay(),
        }
    }
}

/// Remove `role_id` from a member if they hold it. Failures are logged only.
pub(crate) async fn revoke_role<P: ChatPlatform>(
    platform: &P,
    guild_id: Option<GuildId>,
    user_id: UserId,
    held_roles: &[RoleId],
    role_id: Option<RoleId>,
) {
    let (Some(guild_id), Some(role_id)) = (guild_id, role_id) else {
        return;
    };
    if !held_roles.contains(&role_id) {
        return;
    }
    match platform.remove_role(guild_id, user_id, role_id).await {
        Ok(()) => info!(%user_id, %role_id, "removed role"),
        Err(e) => error!(%user_id, %role_id, error = %e, "failed to remove role"),
    }
}

/// Routes inbound events to the selection flow and the channel guard.
pub struct EventDispatcher<P: ChatPlatform> {
    platform: Arc<P>,
    selection: SelectionFlow<P>,
    guard: ChannelGuard<P>,
}

impl<P: ChatPlatform> EventDispatcher<P> {
    pub fn new(
        platform: Arc<P>,
        sessions: Arc<SessionStore>,
        nudges: Arc<NudgeScheduler>,
        settings: FlowSettings,
    ) -> Self {
        let guard = ChannelGuard::new(Arc::clone(&platform), settings.channel_id, settings.role_id);
        let selection = SelectionFlow::new(Arc::clone(&platform), sessions, nudges, settings);
        Self {
            platform,
            selection,
            guard,
        }
    }

    pub fn selection(&self) -> &SelectionFlow<P> {
        &self.selection
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Message(message) => self.handle_message(&message).await,
            InboundEvent::Component(component) => self.handle_component(&component).await,
        }
    }

    async fn handle_message(&self, message: &IncomingMessage) {
        if message.author_is_bot {
            return;
        }

        if command::is_start_command(&message.content) {
            if let Err(e) = self.selection.start(message.channel_id).await {
                error!(channel_id = %message.channel_id, error = %e, "failed to post month menu");
            }
        }

        if let Err(e) = self.guard.inspect(message).await {
            error!(channel_id = %message.channel_id, error = %e, "channel guard failed");
        }
    }

    async fn handle_component(&self, event: &ComponentEvent) {
        if let Err(e) = self.selection.handle(event).await {
            error!(user_id = %event.user_id, action = ?event.action, error = %e, "interaction failed");
            self.report_failure(&event.interaction).await;
        }
    }

    /// Answer an interaction the adapter could not decode.
    pub async fn reject_interaction(&self, interaction: &InteractionRef, err: InteractionError) {
        warn!(error = %err, "undecodable interaction");
        self.report_failure(interaction).await;
    }

    async fn report_failure(&self, interaction: &InteractionRef) {
        let reply = InteractionResponse::Reply(OutboundMessage::ephemeral(render::GENERIC_FAILURE));
        if let Err(e) = self.platform.respond(interaction, reply).await {
            debug!(error = %e, "could not report interaction failure");
        }
    }
}
