//! In-memory `ChatPlatform` that records every call, for flow tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use datebot_types::error::PlatformError;
use datebot_types::event::InteractionRef;
use datebot_types::ids::{ChannelId, GuildId, MessageId, RoleId, UserId};
use datebot_types::outbound::{InteractionResponse, OutboundMessage};

use crate::platform::ChatPlatform;

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    Respond {
        interaction: InteractionRef,
        response: InteractionResponse,
    },
    FollowUp {
        interaction: InteractionRef,
        message: OutboundMessage,
    },
    Send {
        channel_id: ChannelId,
        message: OutboundMessage,
    },
    Delete {
        channel_id: ChannelId,
        message_id: MessageId,
    },
    RemoveRole {
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    },
}

#[derive(Debug, Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    pub fail_responses: AtomicBool,
    /// Fail the next `respond` only; later responses are recorded.
    pub fail_next_response: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_role_removal: AtomicBool,
}

impl RecordingPlatform {
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn responses(&self) -> Vec<InteractionResponse> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Respond { response, .. } => Some(response),
                _ => None,
            })
            .collect()
    }

    pub fn follow_ups(&self) -> Vec<OutboundMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::FollowUp { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Send { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(flag: &AtomicBool) -> Result<(), PlatformError> {
        if flag.load(Ordering::SeqCst) {
            Err(PlatformError::Request("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ChatPlatform for RecordingPlatform {
    async fn respond(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> Result<(), PlatformError> {
        Self::failure(&self.fail_responses)?;
        if self.fail_next_response.swap(false, Ordering::SeqCst) {
            return Err(PlatformError::Request("simulated failure".to_string()));
        }
        self.record(PlatformCall::Respond {
            interaction: interaction.clone(),
            response,
        });
        Ok(())
    }

    async fn follow_up(
        &self,
        interaction: &InteractionRef,
        message: OutboundMessage,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::FollowUp {
            interaction: interaction.clone(),
            message,
        });
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: OutboundMessage,
    ) -> Result<(), PlatformError> {
        self.record(PlatformCall::Send {
            channel_id,
            message,
        });
        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), PlatformError> {
        Self::failure(&self.fail_deletes)?;
        self.record(PlatformCall::Delete {
            channel_id,
            message_id,
        });
        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), PlatformError> {
        Self::failure(&self.fail_role_removal)?;
        self.record(PlatformCall::RemoveRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }
}
