//! Gateway client construction.

use secrecy::{ExposeSecret, SecretString};
use serenity::Client;
use serenity::model::gateway::GatewayIntents;

use super::handler::Handler;

/// Guild metadata, guild messages with their content, and member data (the
/// author's roles arrive on each message and interaction).
pub const GATEWAY_INTENTS: GatewayIntents = GatewayIntents::GUILDS
    .union(GatewayIntents::GUILD_MESSAGES)
    .union(GatewayIntents::MESSAGE_CONTENT)
    .union(GatewayIntents::GUILD_MEMBERS);

/// Build a gateway client that routes every event through `handler`.
pub async fn build_client(token: &SecretString, handler: Handler) -> serenity::Result<Client> {
    Client::builder(token.expose_secret(), GATEWAY_INTENTS)
        .event_handler(handler)
        .await
}
