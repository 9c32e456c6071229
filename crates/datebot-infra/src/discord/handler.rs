//! Gateway event handler.
//!
//! serenity spawns a task per event, so handlers for different users run
//! concurrently. All state lives behind the dispatcher's concurrent maps.

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Message, Ready};
use tracing::{debug, info};

use datebot_core::flow::EventDispatcher;
use datebot_types::event::InboundEvent;

use super::convert;
use super::platform::DiscordPlatform;

pub struct Handler {
    dispatcher: Arc<EventDispatcher<DiscordPlatform>>,
    platform: Arc<DiscordPlatform>,
}

impl Handler {
    pub fn new(
        dispatcher: Arc<EventDispatcher<DiscordPlatform>>,
        platform: Arc<DiscordPlatform>,
    ) -> Self {
        Self {
            dispatcher,
            platform,
        }
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.platform.bind_application(ready.application.id);
        info!(
            tag = %ready.user.tag(),
            guilds = ready.guilds.len(),
            "logged in"
        );
    }

    async fn message(&self, _ctx: Context, message: Message) {
        let event = InboundEvent::Message(convert::incoming_message(&message));
        self.dispatcher.handle(event).await;
    }

    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            debug!("ignoring non-component interaction");
            return;
        };

        match convert::component_event(&component) {
            Ok(event) => self.dispatcher.handle(InboundEvent::Component(event)).await,
            Err(err) => {
                self.dispatcher
                    .reject_interaction(&convert::interaction_ref(&component), err)
                    .await;
            }
        }
    }
}
